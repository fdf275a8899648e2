//! Console output through `log4rs`.

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;

use crate::log::LogConfiguration;

// ISO 8601 timestamp, color coded level, module path
const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

const CONSOLE: &str = "console";

impl LogConfiguration {
    fn to_log4rs(&self) -> Config {
        let console = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();

        // A `Logger` level replaces the root level for its module path.
        let loggers = self
            .module_levels
            .iter()
            .map(|(module, level)| Logger::builder().build(module.clone(), *level));

        let builder = Config::builder()
            .appender(Appender::builder().build(CONSOLE, Box::new(console)))
            .loggers(loggers);
        let root = Root::builder().appender(CONSOLE).build(self.global_level);
        match builder.build(root) {
            Ok(config) => config,
            // Every logger writes to the one appender defined above.
            Err(errors) => panic!("invalid log4rs configuration: {errors}"),
        }
    }

    /// Installs this configuration as the global logger, or swaps it into the installed one.
    pub(in crate::log) fn set_config(&mut self) {
        let config = self.to_log4rs();

        match &self.root_handle {
            Some(handle) => handle.set_config(config),
            None => match log4rs::init_config(config) {
                Ok(handle) => self.root_handle = Some(handle),
                // Another logger is installed by the host. Leave it alone and only apply the
                // global level.
                Err(_) => log::set_max_level(self.global_level),
            },
        }
    }
}
