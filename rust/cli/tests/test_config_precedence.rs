//! Layering of defaults, the TOML file and environment variables, observed
//! through `riverstone cfg` and `riverstone sim`.

use riverstone_cli::exit_code;
use riverstone_cli::run;
use serde_json::Value;
use serial_test::serial;
use std::io::Write;

const KEYS: [&str; 5] = [
    "RIVERSTONE_CONFIG",
    "RIVERSTONE_SEED",
    "RIVERSTONE_SEATS",
    "RIVERSTONE_STACK",
    "RIVERSTONE_AI",
];

/// Restores the variables it touched when dropped.
struct EnvGuard {
    restores: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn set(pairs: &[(&'static str, &str)]) -> Self {
        let restores = KEYS.iter().map(|&k| (k, std::env::var(k).ok())).collect();
        for key in KEYS {
            unsafe {
                std::env::remove_var(key);
            }
        }
        for (key, value) in pairs {
            unsafe {
                std::env::set_var(key, value);
            }
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in &self.restores {
            match previous {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

fn cfg() -> (i32, Value, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["riverstone", "cfg"], &mut out, &mut err);
    let json = serde_json::from_slice(&out).unwrap_or(Value::Null);
    (code, json, String::from_utf8(err).unwrap())
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn defaults_when_nothing_is_set() {
    let _env = EnvGuard::set(&[]);
    let (code, json, _) = cfg();
    assert_eq!(code, exit_code::SUCCESS);
    assert_eq!(json["seats"]["value"].as_u64(), Some(6));
    assert_eq!(json["starting_stack"]["value"].as_u64(), Some(1_000));
    assert_eq!(json["ai"]["value"].as_str(), Some("baseline"));
    assert_eq!(json["seed"]["source"].as_str(), Some("default"));
}

#[test]
#[serial]
fn file_then_env() {
    let file = config_file("seats = 4\nseed = 456\nai = \"equity\"\nbig_blind = 20\n");
    let path = file.path().to_string_lossy().to_string();
    let _env = EnvGuard::set(&[("RIVERSTONE_CONFIG", &path), ("RIVERSTONE_SEED", "7")]);

    let (code, json, _) = cfg();
    assert_eq!(code, exit_code::SUCCESS);
    assert_eq!(json["seats"]["value"].as_u64(), Some(4));
    assert_eq!(json["seats"]["source"].as_str(), Some("file"));
    assert_eq!(json["big_blind"]["value"].as_u64(), Some(20));
    assert_eq!(json["seed"]["value"].as_u64(), Some(7));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["ai"]["source"].as_str(), Some("file"));
}

#[test]
#[serial]
fn invalid_env_value_fails_cfg() {
    let _env = EnvGuard::set(&[("RIVERSTONE_STACK", "lots")]);
    let (code, _, err) = cfg();
    assert_eq!(code, exit_code::ERROR);
    assert!(err.contains("RIVERSTONE_STACK"), "{err}");
}

#[test]
#[serial]
fn inverted_blinds_from_file_are_rejected() {
    let file = config_file("small_blind = 30\nbig_blind = 20\n");
    let path = file.path().to_string_lossy().to_string();
    let _env = EnvGuard::set(&[("RIVERSTONE_CONFIG", &path)]);
    let (code, _, err) = cfg();
    assert_eq!(code, exit_code::ERROR);
    assert!(err.contains("small blind 30 exceeds big blind 20"), "{err}");
}

#[test]
#[serial]
fn flags_override_env_in_sim() {
    let _env = EnvGuard::set(&[("RIVERSTONE_SEATS", "5"), ("RIVERSTONE_SEED", "3")]);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        ["riverstone", "sim", "--hands", "5", "--seats", "2", "--json"],
        &mut out,
        &mut err,
    );
    assert_eq!(code, exit_code::SUCCESS);
    let json: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["seats"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["seed"].as_u64(), Some(3));
}
