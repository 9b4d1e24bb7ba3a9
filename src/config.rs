use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub posts_dir: PathBuf,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Site {
    pub title: String,
    pub base_url: String,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct Defaults {
    pub page_size: u32,
    pub related_limit: Option<usize>,
    pub rendering_cache_enabled: bool,
}

#[derive(Deserialize, Debug)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Part numbers either come from the post title ("... Part 3") or from a
/// numeric suffix in the slug ("some-series-3").
#[derive(Deserialize, Copy, Clone, PartialEq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum PartSource {
    Title,
    Slug,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SeriesDef {
    pub name: String,
    pub prefix: String,
    pub hub_url: String,
    pub part_from: PartSource,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub defaults: Defaults,
    pub server: Server,
    pub log: Option<Log>,
    #[serde(default)]
    pub series: Vec<SeriesDef>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.to_str().unwrap(), e))),
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if cfg.defaults.page_size == 0 {
        return Err(io::Error::new(
            ErrorKind::InvalidData, "Error parsing configuration file: page_size must be at least 1".to_string()));
    }

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir),
        public_dir: parse_path(cfg.paths.public_dir),
        posts_dir: parse_path(cfg.paths.posts_dir),
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r##"
[site]
title = "Taichi Audit Group"
base_url = "https://taichiaudit.com"
description = "Security research and audit engineering"

[paths]
template_dir = "res/templates"
public_dir = "res/public"
posts_dir = "content/blog"

[defaults]
page_size = 10
related_limit = 3
rendering_cache_enabled = true

[server]
address = "127.0.0.1"
port = 8080

[[series]]
name = "Morpho Internals"
prefix = "morpho-internals"
hub_url = "/series/morpho-internals"
part_from = "title"

[[series]]
name = "Solana Security"
prefix = "solana-security-series"
hub_url = "/series/solana-security-series"
part_from = "slug"
"##;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.site.base_url, "https://taichiaudit.com");
        assert_eq!(cfg.defaults.page_size, 10);
        assert_eq!(cfg.series.len(), 2);
        assert_eq!(cfg.series[0].part_from, PartSource::Title);
        assert_eq!(cfg.series[1].part_from, PartSource::Slug);
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_series_table_is_optional() {
        let toml_str = r##"
[site]
title = "t"
base_url = "http://localhost"
description = "d"

[paths]
template_dir = "tpl"
public_dir = "pub"
posts_dir = "posts"

[defaults]
page_size = 5
rendering_cache_enabled = false

[server]
address = "0.0.0.0"
port = 8081
"##;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        assert!(cfg.series.is_empty());
        assert_eq!(cfg.defaults.related_limit, None);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let toml_str = r##"
[site]
title = "t"
base_url = "http://localhost"
description = "d"

[paths]
template_dir = "tpl"
public_dir = "pub"
posts_dir = "posts"

[defaults]
page_size = 0
rendering_cache_enabled = false

[server]
address = "0.0.0.0"
port = 8081
"##;
        let dir = tempfile::TempDir::new().unwrap();
        let cfg_path = dir.path().join("site.toml");
        fs::write(&cfg_path, toml_str).unwrap();

        let err = read_config(&cfg_path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("page_size"));
    }
}
