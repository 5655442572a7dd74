//! Optional RON configuration for simulation knobs and fixture data.
//!
//! A missing `opsdeck.ron` yields the built-in defaults; a malformed one is
//! logged and also falls back to the defaults.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use deck_logging::deck_warn;
use opsdeck_core::{FileNode, Msg, Record, Source};
use opsdeck_engine::SimSettings;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "opsdeck.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub stagger_min_ms: u64,
    pub stagger_max_ms: u64,
    pub success_probability: f64,
    pub merge_delay_ms: u64,
    pub settle_delay_ms: u64,
    pub tick_period_ms: u64,
    pub tick_step: u8,
    pub banner_ms: u64,
    pub seed: u64,
    pub initial_tasks: Vec<String>,
    pub sources: Vec<SourceConfig>,
    pub file_tree: FileNodeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub bookmarks: Vec<BookmarkConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkConfig {
    pub id: u64,
    pub title: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FileNodeConfig {
    File(String),
    Folder(String, Vec<FileNodeConfig>),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stagger_min_ms: 500,
            stagger_max_ms: 1000,
            success_probability: 0.8,
            merge_delay_ms: 500,
            settle_delay_ms: 1000,
            tick_period_ms: 100,
            tick_step: 5,
            banner_ms: 3000,
            seed: 42,
            initial_tasks: vec![
                "ls -la /home/user/documents".to_owned(),
                "docker-compose up -d".to_owned(),
                "git status".to_owned(),
            ],
            sources: vec![
                SourceConfig {
                    name: "Google Chrome".to_owned(),
                    bookmarks: vec![
                        bookmark(1, "React Docs", "reactjs.org"),
                        bookmark(2, "Tailwind CSS", "tailwindcss.com"),
                    ],
                },
                SourceConfig {
                    name: "Mozilla Firefox".to_owned(),
                    bookmarks: vec![
                        bookmark(3, "MDN Web Docs", "developer.mozilla.org"),
                        bookmark(4, "Vite", "vitejs.dev"),
                    ],
                },
                SourceConfig {
                    name: "Local Store".to_owned(),
                    bookmarks: vec![bookmark(5, "GitHub", "github.com")],
                },
            ],
            file_tree: FileNodeConfig::Folder(
                "Project_Alpha".to_owned(),
                vec![
                    FileNodeConfig::File("README.md".to_owned()),
                    FileNodeConfig::File("package.json".to_owned()),
                    FileNodeConfig::Folder(
                        "src".to_owned(),
                        vec![
                            FileNodeConfig::File("index.js".to_owned()),
                            FileNodeConfig::File("App.js".to_owned()),
                            FileNodeConfig::Folder(
                                "components".to_owned(),
                                vec![FileNodeConfig::File("Button.js".to_owned())],
                            ),
                        ],
                    ),
                    FileNodeConfig::Folder(
                        "docs".to_owned(),
                        vec![FileNodeConfig::File("architecture.pdf".to_owned())],
                    ),
                ],
            ),
        }
    }
}

fn bookmark(id: u64, title: &str, location: &str) -> BookmarkConfig {
    BookmarkConfig {
        id,
        title: title.to_owned(),
        location: location.to_owned(),
    }
}

pub fn load_or_default(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            deck_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            deck_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}

impl AppConfig {
    pub fn sim_settings(&self) -> SimSettings {
        SimSettings {
            stagger_min: Duration::from_millis(self.stagger_min_ms),
            stagger_max: Duration::from_millis(self.stagger_max_ms),
            // gen_bool rejects probabilities outside [0, 1].
            success_probability: self.success_probability.clamp(0.0, 1.0),
            merge_delay: Duration::from_millis(self.merge_delay_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            // interval() rejects a zero period.
            tick_period: Duration::from_millis(self.tick_period_ms.max(1)),
            tick_step: self.tick_step,
            banner_duration: Duration::from_millis(self.banner_ms),
            seed: self.seed,
            now: Arc::new(|| chrono::Local::now().format("%H:%M:%S").to_string()),
        }
    }

    /// The startup message seeding the core state with fixture data.
    pub fn fixtures_msg(&self) -> Msg {
        Msg::FixturesLoaded {
            tasks: self.initial_tasks.clone(),
            sources: self.sources.iter().map(to_core_source).collect(),
            tree: to_core_tree(&self.file_tree),
        }
    }
}

fn to_core_source(source: &SourceConfig) -> Source {
    Source {
        name: source.name.clone(),
        records: source
            .bookmarks
            .iter()
            .map(|bookmark| Record {
                id: bookmark.id,
                title: bookmark.title.clone(),
                location: bookmark.location.clone(),
            })
            .collect(),
    }
}

fn to_core_tree(node: &FileNodeConfig) -> FileNode {
    match node {
        FileNodeConfig::File(name) => FileNode::File { name: name.clone() },
        FileNodeConfig::Folder(name, children) => FileNode::Folder {
            name: name.clone(),
            children: children.iter().map(to_core_tree).collect(),
        },
    }
}
