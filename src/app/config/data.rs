use serde::{Deserialize, Serialize};

use crate::{ArcPath, ArcStr, log::LogLevel};

/// Largest window size honored. Larger values, from the file or a setter,
/// are read as this.
pub const MAX_WINDOW_SIZE: usize = 20;

/// Options for path-based configuration values that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum PathOpt {
    /// Directory where log files are stored
    LogDir,
}

/// Options for numeric configuration values that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum USizeOpt {
    /// Maximum age of log files in days before they are deleted
    MaxAge,
    /// Number of boxes a carousel shows at once
    WindowSize,
    /// Duration of a carousel slide in milliseconds
    TransitionMs,
}

/// Options for textual configuration values that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum StrOpt {
    /// Base URL of the catalog API, without trailing slash
    ApiBase,
    /// Key sent with every catalog request
    ApiKey,
}

/// Options for switches that can be accessed and modified.
#[derive(Debug, Clone, Copy)]
pub enum BoolOpt {
    /// Whether opening a movie on the movies screen fetches its details
    MoviesDetail,
    /// Whether opening a show on the TV screen fetches its details
    TvDetail,
    /// Whether opening a search result fetches its details
    SearchDetail,
}

/// The configuration data structure that holds all configurable values.
///
/// Missing keys in the file fall back to their defaults, so a config written
/// by an older version keeps loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    /// Base URL of the catalog API
    api_base: ArcStr,
    /// Key sent with every catalog request
    api_key: ArcStr,
    /// Directory where log files are stored
    log_dir: ArcPath,
    /// Current log level
    log_level: LogLevel,
    /// Maximum age of log files in days before they are deleted
    max_age: usize,
    /// Number of boxes a carousel shows at once
    window_size: usize,
    /// Duration of a carousel slide in milliseconds
    transition_ms: usize,
    movies_detail: bool,
    tv_detail: bool,
    search_detail: bool,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            api_base: ArcStr::from("https://api.themoviedb.org/3"),
            api_key: ArcStr::from("5e4908954e6dd8fdaa22e430943eab2c"),
            log_dir: ArcPath::from("/tmp/cinedeck/logs"),
            log_level: LogLevel::Warning,
            max_age: 0,
            window_size: 5,
            transition_ms: 1000,
            movies_detail: true,
            tv_detail: false,
            search_detail: false,
        }
    }
}

impl Data {
    pub fn path(&self, opt: PathOpt) -> ArcPath {
        match opt {
            PathOpt::LogDir => self.log_dir.clone(),
        }
    }

    pub fn set_path(&mut self, opt: PathOpt, path: ArcPath) {
        match opt {
            PathOpt::LogDir => self.log_dir = path,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    pub fn usize(&self, opt: USizeOpt) -> usize {
        match opt {
            USizeOpt::MaxAge => self.max_age,
            USizeOpt::WindowSize => self.window_size.clamp(1, MAX_WINDOW_SIZE),
            USizeOpt::TransitionMs => self.transition_ms,
        }
    }

    /// Sets a numeric configuration value.
    ///
    /// Window sizes are kept within `1..=MAX_WINDOW_SIZE`.
    pub fn set_usize(&mut self, opt: USizeOpt, value: usize) {
        match opt {
            USizeOpt::MaxAge => self.max_age = value,
            USizeOpt::WindowSize => self.window_size = value.clamp(1, MAX_WINDOW_SIZE),
            USizeOpt::TransitionMs => self.transition_ms = value,
        }
    }

    pub fn str(&self, opt: StrOpt) -> ArcStr {
        match opt {
            StrOpt::ApiBase => self.api_base.clone(),
            StrOpt::ApiKey => self.api_key.clone(),
        }
    }

    pub fn set_str(&mut self, opt: StrOpt, value: ArcStr) {
        match opt {
            StrOpt::ApiBase => self.api_base = value,
            StrOpt::ApiKey => self.api_key = value,
        }
    }

    pub fn bool(&self, opt: BoolOpt) -> bool {
        match opt {
            BoolOpt::MoviesDetail => self.movies_detail,
            BoolOpt::TvDetail => self.tv_detail,
            BoolOpt::SearchDetail => self.search_detail,
        }
    }

    pub fn set_bool(&mut self, opt: BoolOpt, value: bool) {
        match opt {
            BoolOpt::MoviesDetail => self.movies_detail = value,
            BoolOpt::TvDetail => self.tv_detail = value,
            BoolOpt::SearchDetail => self.search_detail = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_default_values() {
        let data = Data::default();
        assert_eq!(data.log_level(), LogLevel::Warning);
        assert_eq!(
            data.path(PathOpt::LogDir).to_str().unwrap(),
            "/tmp/cinedeck/logs"
        );
        assert_eq!(data.usize(USizeOpt::MaxAge), 0);
        assert_eq!(data.usize(USizeOpt::WindowSize), 5);
        assert_eq!(data.usize(USizeOpt::TransitionMs), 1000);
        assert_eq!(&*data.str(StrOpt::ApiBase), "https://api.themoviedb.org/3");
        assert!(data.bool(BoolOpt::MoviesDetail));
        assert!(!data.bool(BoolOpt::TvDetail));
        assert!(!data.bool(BoolOpt::SearchDetail));
    }

    #[test]
    fn test_data_setters_and_getters() {
        let mut data = Data::default();

        data.set_log_level(LogLevel::Info);
        assert_eq!(data.log_level(), LogLevel::Info);

        let new_path = ArcPath::from("/var/log");
        data.set_path(PathOpt::LogDir, new_path.clone());
        assert_eq!(data.path(PathOpt::LogDir), new_path);

        data.set_usize(USizeOpt::WindowSize, 0);
        assert_eq!(data.usize(USizeOpt::WindowSize), 1);
        data.set_usize(USizeOpt::WindowSize, usize::MAX);
        assert_eq!(data.usize(USizeOpt::WindowSize), MAX_WINDOW_SIZE);

        data.set_str(StrOpt::ApiKey, ArcStr::from("other"));
        assert_eq!(&*data.str(StrOpt::ApiKey), "other");

        data.set_bool(BoolOpt::SearchDetail, true);
        assert!(data.bool(BoolOpt::SearchDetail));
    }

    #[test]
    fn test_data_serialization() {
        let mut data = Data::default();
        data.set_log_level(LogLevel::Error);
        data.set_path(PathOpt::LogDir, ArcPath::from("/custom/log"));
        data.set_usize(USizeOpt::TransitionMs, 250);
        data.set_bool(BoolOpt::TvDetail, true);

        let toml = toml::to_string_pretty(&data).unwrap();
        let deserialized: Data = toml::from_str(&toml).unwrap();

        assert_eq!(data, deserialized);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let data: Data = toml::from_str("window_size = 3\nlog_level = \"Info\"\n").unwrap();

        assert_eq!(data.usize(USizeOpt::WindowSize), 3);
        assert_eq!(data.log_level(), LogLevel::Info);
        assert_eq!(data.usize(USizeOpt::TransitionMs), 1000);
        assert!(data.bool(BoolOpt::MoviesDetail));
    }

    #[test]
    fn test_huge_window_size_in_file_is_capped() {
        let data: Data = toml::from_str("window_size = 4000000000\n").unwrap();
        assert_eq!(data.usize(USizeOpt::WindowSize), MAX_WINDOW_SIZE);
    }
}
