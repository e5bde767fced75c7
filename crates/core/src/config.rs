use crate::render::{RenderOptions, WriteMode, DEFAULT_IMAGE_WIDTH, DEFAULT_TEXT_TIMESTAMP};
use crate::scanner::DecodeErrorPolicy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub on_decode_error: DecodeErrorPolicy,
    pub write_mode: WriteMode,
    pub image_width: u32,
    pub text_timestamp: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            on_decode_error: DecodeErrorPolicy::Skip,
            write_mode: WriteMode::Truncate,
            image_width: DEFAULT_IMAGE_WIDTH,
            text_timestamp: DEFAULT_TEXT_TIMESTAMP.to_string(),
        }
    }
}

impl AppConfig {
    pub fn render_options(&self, out_dir: PathBuf) -> RenderOptions {
        RenderOptions {
            out_dir,
            write_mode: self.write_mode,
            image_width: self.image_width,
            text_timestamp: self.text_timestamp.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_path: PathBuf,
}

pub fn app_paths() -> Result<AppPaths> {
    let proj = ProjectDirs::from("com", "kelly", "exiflist")
        .context("OS標準設定ディレクトリを取得できませんでした")?;
    let config_dir = proj.config_dir().to_path_buf();
    Ok(AppPaths {
        config_path: config_dir.join("config.toml"),
        config_dir,
    })
}

pub fn load_config() -> Result<AppConfig> {
    let paths = app_paths()?;
    load_config_from(&paths.config_path)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("設定ファイルを読めませんでした: {}", path.display()))?;

    let config = toml::from_str::<AppConfig>(&raw).context("設定ファイルのパースに失敗しました")?;
    Ok(config)
}

pub fn save_config(config: &AppConfig) -> Result<PathBuf> {
    let paths = app_paths()?;
    fs::create_dir_all(&paths.config_dir).with_context(|| {
        format!(
            "設定ディレクトリを作成できませんでした: {}",
            paths.config_dir.display()
        )
    })?;
    let body = toml::to_string_pretty(config).context("設定のシリアライズに失敗しました")?;
    fs::write(&paths.config_path, body).with_context(|| {
        format!(
            "設定ファイルを書き込めませんでした: {}",
            paths.config_path.display()
        )
    })?;
    Ok(paths.config_path)
}
