// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static CONFIG: OnceLock<FlightlineConfig> = OnceLock::new();

fn default_log_level() -> String {
    "info".to_string()
}

pub fn init_from_path(path: impl AsRef<Path>) -> Result<&'static FlightlineConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let path = path.as_ref().to_path_buf();
    let cfg = FlightlineConfig::load_from_file(&path)?;
    let _ = CONFIG.set(cfg);
    Ok(CONFIG.get().expect("CONFIG set"))
}

pub fn init_from_env_or_default() -> Result<&'static FlightlineConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let path = config_path_from_env_or_default()?;
    let cfg = FlightlineConfig::load_from_file(&path)?;
    let _ = CONFIG.set(cfg);
    Ok(CONFIG.get().expect("CONFIG set"))
}

pub fn config() -> Result<&'static FlightlineConfig> {
    init_from_env_or_default()
}

fn config_path_from_env_or_default() -> Result<PathBuf> {
    if let Ok(p) = std::env::var("FLIGHTLINE_CONFIG") {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p));
        }
    }

    let candidates = [PathBuf::from("flightline.toml")];
    for p in candidates {
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "missing config file: set $FLIGHTLINE_CONFIG or create ./flightline.toml"
    ))
}

#[derive(Clone, Deserialize)]
pub struct FlightlineConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional full tracing EnvFilter expression.
    /// If set, this takes precedence over `log_level`.
    /// Example: "flightline=debug,h2=off,hyper=off,tonic=off"
    #[serde(default)]
    pub log_filter: Option<String>,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl FlightlineConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let cfg: FlightlineConfig =
            toml::from_str(&s).with_context(|| format!("parse toml: {}", path.display()))?;
        Ok(cfg)
    }
}

impl Default for FlightlineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_filter: None,
            client: ClientConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_connect_timeout_ms() -> u64 {
    20_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct RuntimeConfig {
    /// Maximum number of undelivered chunks buffered across all endpoint
    /// producers of one result set.
    #[serde(default = "default_chunk_buffer_capacity")]
    pub chunk_buffer_capacity: usize,
    #[serde(default = "default_flight_runtime_worker_threads")]
    pub flight_runtime_worker_threads: usize,
    #[serde(default = "default_flight_runtime_max_blocking_threads")]
    pub flight_runtime_max_blocking_threads: usize,
}

fn default_chunk_buffer_capacity() -> usize {
    5
}
fn default_flight_runtime_worker_threads() -> usize {
    2
}
fn default_flight_runtime_max_blocking_threads() -> usize {
    16
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            chunk_buffer_capacity: default_chunk_buffer_capacity(),
            flight_runtime_worker_threads: default_flight_runtime_worker_threads(),
            flight_runtime_max_blocking_threads: default_flight_runtime_max_blocking_threads(),
        }
    }
}
