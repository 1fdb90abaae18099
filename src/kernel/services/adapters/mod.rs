//! Service adapters: OS/runtime specific implementations (IO/async/grammars).

pub mod paths;
pub mod runtime;
pub mod settings;
#[cfg(feature = "syntax")]
pub mod syntax;

pub use paths::{ensure_log_dir, get_app_data_dir, get_cache_dir, get_log_dir};
pub use runtime::build_runtime;
pub use settings::{
    ensure_settings_file, get_settings_path, load_settings, load_settings_from,
    write_default_settings, SettingsError,
};
#[cfg(feature = "syntax")]
pub use syntax::TreeSitterParser;
