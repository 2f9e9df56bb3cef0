use terrain_core::{
    TerrainConfig, TerrainError, TerrainPreset, free_terrain, generate_terrain,
};

fn scenario_config(seed: u32) -> TerrainConfig {
    TerrainConfig {
        width: 4,
        height: 4,
        scale: 1.0,
        height_multiplier: 10.0,
        octaves: 3,
        persistence: 0.5,
        lacunarity: 2.0,
        seed,
        water_level: 0.3,
    }
}

#[test]
fn test_small_grid_scenario() {
    let mesh = generate_terrain(&scenario_config(42)).expect("generation failed");
    assert_eq!(mesh.vertex_count(), 16);
    assert_eq!(mesh.index_count(), 54);
    assert_eq!(mesh.triangle_count(), 18);

    // Re-running with the same seed reproduces the exact heights
    let again = generate_terrain(&scenario_config(42)).expect("generation failed");
    let ys: Vec<u32> = mesh.positions().iter().map(|p| p[1].to_bits()).collect();
    let ys_again: Vec<u32> = again.positions().iter().map(|p| p[1].to_bits()).collect();
    assert_eq!(ys, ys_again);
}

#[test]
fn test_generation_is_deterministic() {
    let config = TerrainConfig {
        width: 24,
        height: 17,
        ..TerrainConfig::default()
    };
    let a = generate_terrain(&config).unwrap();
    let b = generate_terrain(&config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_differ() {
    let a = generate_terrain(&scenario_config(1)).unwrap();
    let b = generate_terrain(&scenario_config(2)).unwrap();
    assert_ne!(a.positions(), b.positions());
}

#[test]
fn test_topology_for_rectangular_grids() {
    for &(w, h) in &[(2, 2), (2, 9), (13, 3), (31, 20)] {
        let config = TerrainConfig {
            width: w,
            height: h,
            ..TerrainConfig::default()
        };
        let mesh = generate_terrain(&config).unwrap();
        let vertex_count = (w * h) as usize;
        assert_eq!(mesh.vertex_count(), vertex_count);
        assert_eq!(mesh.index_count(), ((w - 1) * (h - 1) * 6) as usize);
        assert_eq!(mesh.normals().len(), vertex_count);
        assert_eq!(mesh.colors().len(), vertex_count);
        assert!(mesh.indices().iter().all(|&i| (i as usize) < vertex_count));
    }
}

#[test]
fn test_normals_unit_or_up() {
    for preset in TerrainPreset::ALL {
        let config = TerrainConfig {
            width: 20,
            height: 20,
            ..TerrainConfig::default()
        }
        .with_preset(preset);
        let mesh = generate_terrain(&config).unwrap();
        for n in mesh.normals() {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!(
                (len - 1.0).abs() < 1e-4 || *n == [0.0, 1.0, 0.0],
                "{preset}: normal {:?}",
                n
            );
        }
    }
}

#[test]
fn test_heights_stay_in_band() {
    // (fbm + 1) / 2 keeps heights near [0, 1] before the multiplier
    let config = TerrainConfig {
        width: 40,
        height: 40,
        height_multiplier: 1.0,
        ..TerrainConfig::default()
    };
    let mesh = generate_terrain(&config).unwrap();
    for p in mesh.positions() {
        assert!(p[1] >= -0.25 && p[1] <= 1.25, "height {}", p[1]);
    }
}

#[test]
fn test_water_level_does_not_affect_geometry() {
    let low = generate_terrain(&scenario_config(9)).unwrap();
    let high = generate_terrain(&TerrainConfig {
        water_level: 0.9,
        ..scenario_config(9)
    })
    .unwrap();
    assert_eq!(low, high);
}

#[test]
fn test_concurrent_generation_matches_sequential() {
    let seeds = [3u32, 1_000, 77, u32::MAX];
    let sequential: Vec<_> = seeds
        .iter()
        .map(|&s| generate_terrain(&scenario_config(s)).unwrap())
        .collect();

    let concurrent: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .iter()
            .map(|&s| scope.spawn(move || generate_terrain(&scenario_config(s)).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}

#[test]
fn test_invalid_configs_fail_cleanly() {
    let too_narrow = TerrainConfig {
        width: 1,
        ..scenario_config(0)
    };
    let no_octaves = TerrainConfig {
        octaves: 0,
        ..scenario_config(0)
    };
    for config in [too_narrow, no_octaves] {
        assert!(matches!(
            generate_terrain(&config),
            Err(TerrainError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_excessive_octaves_are_rejected() {
    let config = TerrainConfig {
        width: 2,
        height: 2,
        octaves: u32::MAX,
        ..TerrainConfig::default()
    };
    assert!(matches!(
        generate_terrain(&config),
        Err(TerrainError::InvalidConfig(_))
    ));
}

#[test]
fn test_oversized_grid_reports_allocation_failure() {
    // Passes validation (fits u32 indices) but needs ~50 GB per attribute buffer
    let config = TerrainConfig {
        width: 65_535,
        height: 65_535,
        ..TerrainConfig::default()
    };
    assert!(config.validate().is_ok());
    assert!(matches!(
        generate_terrain(&config),
        Err(TerrainError::AllocationFailure { .. })
    ));
}

#[test]
fn test_free_twice_and_free_none() {
    let mut handle = Some(generate_terrain(&scenario_config(42)).unwrap());
    free_terrain(&mut handle);
    free_terrain(&mut handle);
    assert!(handle.is_none());

    let mut nothing = None;
    free_terrain(&mut nothing);
}
