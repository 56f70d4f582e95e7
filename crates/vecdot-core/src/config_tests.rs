//! Tests for configuration layering and validation.

use std::io::Write;

use figment::Jail;

use crate::config::{BenchConfig, KernelChoice, DEFAULT_LEN, DEFAULT_SEED};
use crate::error::Error;
use crate::simd_native::{simd_level, SimdLevel};

#[test]
fn test_defaults_match_reference_program() {
    let config = BenchConfig::default();
    assert_eq!(config.len, 1_000_003);
    assert_eq!(config.len, DEFAULT_LEN);
    assert_eq!(config.seed, DEFAULT_SEED);
    assert_eq!(config.low, -1.0);
    assert_eq!(config.high, 1.0);
    assert_eq!(config.kernel, KernelChoice::Auto);
    assert_eq!(config.warmup, 0);
    assert_eq!(config.runs, 1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_runs() {
    let config = BenchConfig {
        runs: 0,
        ..BenchConfig::default()
    };
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_validate_rejects_bad_ranges() {
    for (low, high) in [
        (1.0, 1.0),
        (2.0, -2.0),
        (f32::NAN, 1.0),
        (0.0, f32::INFINITY),
        (-3.0e38, 3.0e38),
    ] {
        let config = BenchConfig {
            low,
            high,
            ..BenchConfig::default()
        };
        assert!(
            matches!(config.validate(), Err(Error::InvalidRange { .. })),
            "[{low}, {high}) should be rejected"
        );
    }
}

#[test]
fn test_kernel_choice_parse_and_display() {
    assert_eq!("auto".parse::<KernelChoice>().unwrap(), KernelChoice::Auto);
    assert_eq!("AUTO".parse::<KernelChoice>().unwrap(), KernelChoice::Auto);
    assert_eq!(
        "scalar".parse::<KernelChoice>().unwrap(),
        KernelChoice::Force(SimdLevel::Scalar)
    );
    assert_eq!(
        "neon".parse::<KernelChoice>().unwrap(),
        KernelChoice::Force(SimdLevel::Neon)
    );
    assert!("fastest".parse::<KernelChoice>().is_err());

    assert_eq!(KernelChoice::Auto.to_string(), "auto");
    assert_eq!(KernelChoice::Force(SimdLevel::Avx).to_string(), "avx");
}

#[test]
fn test_kernel_choice_resolve() {
    assert_eq!(KernelChoice::Auto.resolve().unwrap(), simd_level());
    assert_eq!(
        KernelChoice::Force(SimdLevel::Scalar).resolve().unwrap(),
        SimdLevel::Scalar
    );
    if let Some(missing) = SimdLevel::ALL.into_iter().find(|l| !l.is_available()) {
        assert!(matches!(
            KernelChoice::Force(missing).resolve(),
            Err(Error::UnsupportedKernel(_))
        ));
    }
}

#[test]
fn test_kernel_choice_serde_as_string() {
    let config = BenchConfig {
        kernel: KernelChoice::Force(SimdLevel::Scalar),
        ..BenchConfig::default()
    };
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["kernel"], "scalar");

    let back: BenchConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_load_without_sources_gives_defaults() {
    Jail::expect_with(|_jail| {
        let config = BenchConfig::load(None).unwrap();
        assert_eq!(config, BenchConfig::default());
        Ok(())
    });
}

#[test]
fn test_load_toml_then_env_override() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "vecdot.toml",
            r#"
                len = 4096
                seed = 7
                kernel = "scalar"
                runs = 3
            "#,
        )?;
        jail.set_env("VECDOT_SEED", "99");
        jail.set_env("VECDOT_WARMUP", "2");

        let config = BenchConfig::load(Some("vecdot.toml".as_ref())).unwrap();
        assert_eq!(config.len, 4096);
        assert_eq!(config.seed, 99);
        assert_eq!(config.kernel, KernelChoice::Force(SimdLevel::Scalar));
        assert_eq!(config.warmup, 2);
        assert_eq!(config.runs, 3);
        assert_eq!(config.low, -1.0);
        Ok(())
    });
}

#[test]
fn test_load_rejects_invalid_values() {
    Jail::expect_with(|jail| {
        jail.set_env("VECDOT_RUNS", "0");
        assert!(matches!(
            BenchConfig::load(None),
            Err(Error::InvalidConfig(_))
        ));
        Ok(())
    });

    Jail::expect_with(|jail| {
        jail.create_file("wide.toml", "low = -3.0e38\nhigh = 3.0e38\n")?;
        assert!(matches!(
            BenchConfig::load(Some("wide.toml".as_ref())),
            Err(Error::InvalidRange { .. })
        ));
        Ok(())
    });

    Jail::expect_with(|jail| {
        jail.set_env("VECDOT_KERNEL", "sse9");
        assert!(matches!(BenchConfig::load(None), Err(Error::Config(_))));
        Ok(())
    });
}

#[test]
fn test_load_missing_file() {
    Jail::expect_with(|_jail| {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            BenchConfig::load(Some(&missing)),
            Err(Error::InvalidConfig(_))
        ));
        Ok(())
    });
}

#[test]
fn test_load_from_tempfile() {
    Jail::expect_with(|_jail| {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "low = -0.5\nhigh = 0.5").unwrap();

        let config = BenchConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.low, -0.5);
        assert_eq!(config.high, 0.5);
        Ok(())
    });
}
