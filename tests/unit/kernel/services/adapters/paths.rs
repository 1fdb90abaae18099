use super::*;

#[test]
fn log_dir_lives_under_app_data_dir() {
    let Some(data) = get_app_data_dir() else {
        return;
    };
    let dir = get_log_dir().unwrap();
    assert!(dir.starts_with(&data));
    assert!(data.to_string_lossy().contains(APP_NAME));
    assert!(dir.to_string_lossy().ends_with(LOG_DIR));
}

#[test]
fn cache_dir_is_available_when_data_dir_is() {
    if get_app_data_dir().is_some() {
        assert!(get_cache_dir().is_some());
    }
}
