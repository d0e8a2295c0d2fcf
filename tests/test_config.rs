use reqguard::config::{Config, Limits, ValidationPolicy};
use std::sync::Mutex;

// tests in this file share the process environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_config_default_address() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    unsafe {
        std::env::remove_var("LISTEN");
        std::env::remove_var("REQGUARD_CONFIG");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.limits, Limits::default());
    assert!(cfg.validation.reject_conflicting_content_length);
}

#[test]
fn test_config_custom_address_from_env() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    unsafe {
        std::env::remove_var("REQGUARD_CONFIG");
        std::env::set_var("LISTEN", "0.0.0.0:3000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    unsafe {
        std::env::remove_var("LISTEN");
    }
}

#[test]
fn test_config_file_then_env_override() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let path = std::env::temp_dir().join(format!("reqguard-config-{}.yaml", std::process::id()));
    std::fs::write(
        &path,
        "listen_addr: 127.0.0.1:9000\nlimits:\n  max_body_bytes: 1024\n",
    )
    .unwrap();

    unsafe {
        std::env::set_var("REQGUARD_CONFIG", &path);
        std::env::set_var("LISTEN", "127.0.0.1:9100");
    }
    let cfg = Config::load().unwrap();
    unsafe {
        std::env::remove_var("REQGUARD_CONFIG");
        std::env::remove_var("LISTEN");
    }
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:9100");
    assert_eq!(cfg.limits.max_body_bytes, 1024);
    assert_eq!(cfg.limits.max_head_bytes, Limits::default().max_head_bytes);
}

#[test]
fn test_config_missing_file_is_an_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    unsafe {
        std::env::set_var("REQGUARD_CONFIG", "/nonexistent/reqguard.yaml");
    }
    let result = Config::load();
    unsafe {
        std::env::remove_var("REQGUARD_CONFIG");
    }
    assert!(result.is_err());
}

#[test]
fn test_config_yaml_validation_section() {
    let cfg = Config::from_yaml_str("validation:\n  reject_conflicting_content_length: false\n").unwrap();

    assert_eq!(
        cfg.validation,
        ValidationPolicy {
            reject_conflicting_content_length: false
        }
    );
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
}

#[test]
fn test_config_yaml_rejects_wrong_types() {
    assert!(Config::from_yaml_str("limits:\n  max_head_bytes: lots\n").is_err());
}
