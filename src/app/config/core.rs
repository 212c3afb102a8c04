use anyhow::Context;

use crate::{ArcPath, ArcStr, env::Env, fs::Fs};

use super::{
    data::{Data, StrOpt},
    message::Message,
};

/// Environment variable that overrides the API key found in the file.
pub const API_KEY_VAR: &str = "CINEDECK_API_KEY";

/// The core configuration actor that handles file I/O and data management.
///
/// The file is TOML. Reading and writing go through the filesystem actor, so
/// tests can point the configuration at a temporary tree.
pub struct Core {
    /// The environment actor, consulted for overrides on load
    env: Env,
    /// The filesystem actor for file operations
    fs: Fs,
    /// The path to the configuration file
    path: ArcPath,
    /// The current configuration data
    data: Data,
}

impl Core {
    pub fn new(env: Env, fs: Fs, path: ArcPath) -> Self {
        Self {
            env,
            fs,
            path,
            data: Data::default(),
        }
    }

    /// Spawns the configuration actor and returns a handle to it.
    pub fn spawn(mut self) -> (super::Config, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                match msg {
                    Message::Load { tx } => {
                        let res = self.load().await;
                        let _ = tx.send(res);
                    }
                    Message::Save { tx } => {
                        let res = self.save().await;
                        let _ = tx.send(res);
                    }
                    Message::GetPath { opt, tx } => {
                        let _ = tx.send(self.data.path(opt));
                    }
                    Message::SetPath { opt, path } => {
                        self.data.set_path(opt, path);
                    }
                    Message::GetLogLevel { tx } => {
                        let _ = tx.send(self.data.log_level());
                    }
                    Message::SetLogLevel { level } => {
                        self.data.set_log_level(level);
                    }
                    Message::GetUSize { opt, tx } => {
                        let _ = tx.send(self.data.usize(opt));
                    }
                    Message::SetUSize { opt, size } => {
                        self.data.set_usize(opt, size);
                    }
                    Message::GetStr { opt, tx } => {
                        let _ = tx.send(self.data.str(opt));
                    }
                    Message::SetStr { opt, value } => {
                        self.data.set_str(opt, value);
                    }
                    Message::GetBool { opt, tx } => {
                        let _ = tx.send(self.data.bool(opt));
                    }
                    Message::SetBool { opt, value } => {
                        self.data.set_bool(opt, value);
                    }
                }
            }
        });
        (super::Config::Actual(tx), handle)
    }

    /// Loads the configuration from the file, then applies environment overrides.
    ///
    /// On failure the data in memory is left untouched.
    async fn load(&mut self) -> anyhow::Result<()> {
        let contents = self
            .fs
            .read_file(self.path.clone())
            .await
            .with_context(|| format!("Reading config file {}", self.path))?;
        let mut data: Data = toml::from_str(&contents)
            .with_context(|| format!("Parsing config file {}", self.path))?;

        if let Ok(key) = self.env.env(ArcStr::from(API_KEY_VAR)).await {
            if !key.is_empty() {
                data.set_str(StrOpt::ApiKey, key);
            }
        }

        self.data = data;
        Ok(())
    }

    /// Saves the current configuration to the file, creating its directory.
    async fn save(&self) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(&self.data).context("Serializing config")?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs
                .mkdir(ArcPath::from(parent))
                .await
                .with_context(|| format!("Creating config directory {}", parent.display()))?;
        }
        self.fs
            .write_file(self.path.clone(), contents)
            .await
            .with_context(|| format!("Writing config file {}", self.path))?;
        Ok(())
    }
}
