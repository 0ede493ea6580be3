use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use file_renamer::config::CONFIG_ENV;
use file_renamer::{ConfigLocation, ConfigSource, LoadResult, load_or_init, locate_config};

const MINIMAL: &str =
    "<config><path>/r</path><connection_string>names.sqlite</connection_string></config>";

struct EnvGuard(Option<std::ffi::OsString>);

impl EnvGuard {
    fn set(value: Option<&std::path::Path>) -> Self {
        let prev = env::var_os(CONFIG_ENV);
        unsafe {
            match value {
                Some(v) => env::set_var(CONFIG_ENV, v),
                None => env::remove_var(CONFIG_ENV),
            }
        }
        EnvGuard(prev)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.0 {
                Some(v) => env::set_var(CONFIG_ENV, v),
                None => env::remove_var(CONFIG_ENV),
            }
        }
    }
}

#[test]
#[serial]
fn explicit_flag_wins_over_env() {
    let td = tempdir().unwrap();
    let _g = EnvGuard::set(Some(td.path().join("env.xml").as_path()));
    let flag = td.path().join("flag.xml");

    let loc = locate_config(Some(&flag)).unwrap();
    assert_eq!(loc.path, flag);
    assert_eq!(loc.source, ConfigSource::Flag);
}

#[test]
#[serial]
fn env_var_is_used_when_no_flag() {
    let td = tempdir().unwrap();
    let p = td.path().join("env.xml");
    let _g = EnvGuard::set(Some(p.as_path()));

    let loc = locate_config(None).unwrap();
    assert_eq!(loc.path, p);
    assert_eq!(loc.source, ConfigSource::Env);
}

#[test]
#[serial]
fn working_directory_config_is_found() {
    let td = tempdir().unwrap();
    let _g = EnvGuard::set(None);
    fs::write(td.path().join("config.xml"), MINIMAL).unwrap();
    let prev = env::current_dir().unwrap();
    env::set_current_dir(td.path()).unwrap();

    let loc = locate_config(None);
    env::set_current_dir(prev).unwrap();

    let loc = loc.unwrap();
    assert_eq!(loc.source, ConfigSource::WorkingDir);
    assert!(loc.path.ends_with("config.xml"));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let td = tempdir().unwrap();
    let loc = ConfigLocation {
        path: td.path().join("absent.xml"),
        source: ConfigSource::Flag,
    };
    let err = load_or_init(&loc).unwrap_err();
    assert!(format!("{err}").contains("does not exist"));
    assert!(!loc.path.exists());
}

#[test]
fn missing_platform_default_gets_a_template() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let path: PathBuf = base.join("file_renamer").join("config.xml");
    let loc = ConfigLocation {
        path: path.clone(),
        source: ConfigSource::PlatformDefault,
    };

    match load_or_init(&loc).unwrap() {
        LoadResult::CreatedTemplate(p) => assert_eq!(p, path),
        LoadResult::Loaded(_) => panic!("expected a template"),
    }
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("<dry_run>true</dry_run>"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    // Second call loads it instead of overwriting.
    assert!(matches!(load_or_init(&loc).unwrap(), LoadResult::Loaded(_)));
}

#[test]
fn existing_file_is_loaded() {
    let td = tempdir().unwrap();
    let p = td.path().join("c.xml");
    fs::write(&p, MINIMAL).unwrap();
    let loc = ConfigLocation {
        path: p,
        source: ConfigSource::Env,
    };
    let LoadResult::Loaded(cfg) = load_or_init(&loc).unwrap() else {
        panic!("expected loaded config");
    };
    assert_eq!(cfg.connection_string, "names.sqlite");
}
