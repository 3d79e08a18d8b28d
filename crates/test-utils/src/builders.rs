#![allow(dead_code)]

use watchdo::config::{RawSettings, Settings};

/// Builder for `Settings` to simplify test setup.
///
/// Starts from an empty `RawSettings`, so at least one glob and one command
/// must be added before `build`. Banners and screen clearing are off and the
/// interval is short, which is what runtime tests want.
pub struct SettingsBuilder {
    raw: RawSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawSettings {
                interval: Some(0.05),
                disable_banners: Some(true),
                disable_clear: Some(true),
                ..RawSettings::default()
            },
        }
    }

    pub fn watch(mut self, pattern: &str) -> Self {
        self.raw.watch.push(pattern.to_string());
        self
    }

    pub fn run(mut self, command: &str) -> Self {
        self.raw.commands.push(command.to_string());
        self
    }

    pub fn method(mut self, name: &str) -> Self {
        self.raw.watcher_method = Some(name.to_string());
        self
    }

    pub fn wait_time(mut self, secs: f64) -> Self {
        self.raw.wait_time = Some(secs);
        self
    }

    pub fn banners(mut self, enabled: bool) -> Self {
        self.raw.disable_banners = Some(!enabled);
        self
    }

    pub fn reglob(mut self, val: bool) -> Self {
        self.raw.reglob = Some(val);
        self
    }

    pub fn run_on_remove(mut self, val: bool) -> Self {
        self.raw.run_on_remove = Some(val);
        self
    }

    pub fn multi(mut self, val: bool) -> Self {
        self.raw.multi = Some(val);
        self
    }

    pub fn raw(self) -> RawSettings {
        self.raw
    }

    pub fn build(self) -> Settings {
        Settings::try_from(self.raw).expect("Failed to build valid settings from builder")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
