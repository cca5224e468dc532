use slog::{o, Discard, Drain, Logger};
use slog_async::Async;
use slog_term::{FullFormat, PlainDecorator, TermDecorator};

/// Configuration for setting up the logger
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub async_buffer_size: usize,
    pub use_color: bool,
    /// Plain output to stdout, no terminal detection (useful when piping to a collector)
    pub plain: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            async_buffer_size: 1024,
            use_color: true,
            plain: false,
        }
    }
}

impl LoggerConfig {
    /// Plain output when the service logs JSON via tracing, colored terminal output otherwise
    pub fn from_app_config(cfg: &crate::config::AppConfig) -> Self {
        Self {
            use_color: cfg.is_development(),
            plain: cfg.log_json,
            ..Self::default()
        }
    }
}

/// Sets up the root slog logger handed to services and the command pipeline
pub fn setup_logger(config: LoggerConfig) -> Logger {
    if config.plain {
        let decorator = PlainDecorator::new(std::io::stdout());
        let drain = FullFormat::new(decorator).build().fuse();
        let drain = Async::new(drain)
            .chan_size(config.async_buffer_size)
            .build()
            .fuse();
        return Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")));
    }

    let decorator = {
        let builder = TermDecorator::new();
        let builder = if config.use_color {
            builder.force_color()
        } else {
            builder
        };
        builder.build()
    };

    let drain = FullFormat::new(decorator).build().fuse();

    let drain = Async::new(drain)
        .chan_size(config.async_buffer_size)
        .build()
        .fuse();

    Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

/// Child logger tagged with the owning component
pub fn component_logger(root: &Logger, component: &'static str) -> Logger {
    root.new(o!("component" => component))
}

/// Logger that drops every record; used by tests and the CLI
pub fn discard_logger() -> Logger {
    Logger::root(Discard, o!())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_logger_inherits_root() {
        let root = setup_logger(LoggerConfig {
            async_buffer_size: 16,
            use_color: false,
            plain: true,
        });
        let child = component_logger(&root, "products");
        slog::info!(child, "component logger ready"; "entity" => "product");
    }

    #[test]
    fn discard_logger_accepts_records() {
        let logger = discard_logger();
        slog::warn!(logger, "dropped"; "code" => "DUPLICATED_PRODUCT");
    }
}
