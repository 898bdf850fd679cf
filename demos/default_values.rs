//! Demonstrates a help subsystem that annotates options and arguments with
//! lazily computed default values.
//!
//! Run with: RUST_LOG=trace cargo run --example default_values

use std::time::{SystemTime, UNIX_EPOCH};
use symbol_annotations::{
    AnnotationError, CliArgument, CliOption, CliSymbol, Subsystem, ValueFuncAnnotationAccessor,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), AnnotationError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Symbols know nothing about help
    let port = CliOption::<u16>::new("--port");
    let name = CliOption::<String>::new("--name");
    let seed = CliOption::<u64>::new("--seed");
    let target = CliArgument::<String>::new("target");

    let help = HelpSubsystem::new();

    help.port_default.set(&port, || 8080);
    help.text_default.set(&name, || {
        std::env::var("USER").unwrap_or_else(|_| "anonymous".to_string())
    });
    // Only computed when help is actually rendered
    help.seed_default.set(&seed, || {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    });

    let symbols: Vec<&CliSymbol> = vec![&*port, &*name, &*seed, &*target];
    for symbol in symbols {
        println!("{}", help.render(symbol)?);
    }

    Ok(())
}

// ============================================================================
// A subsystem exposing its slots as accessors
// ============================================================================

struct HelpSubsystem {
    port_default: ValueFuncAnnotationAccessor<Subsystem, u16>,
    text_default: ValueFuncAnnotationAccessor<Subsystem, String>,
    seed_default: ValueFuncAnnotationAccessor<Subsystem, u64>,
}

impl HelpSubsystem {
    fn new() -> Self {
        let subsystem = Subsystem::new("help");
        Self {
            port_default: subsystem.value_func_accessor("port_default"),
            text_default: subsystem.value_func_accessor("text_default"),
            seed_default: subsystem.value_func_accessor("seed_default"),
        }
    }

    /// Renders one help line, recovering the value type from the symbol's tag
    fn render(&self, symbol: &CliSymbol) -> Result<String, AnnotationError> {
        let default = if symbol.value_type().is::<u16>() {
            self.port_default
                .try_get_as::<u16>(symbol)?
                .map(|factory| factory().to_string())
        } else if symbol.value_type().is::<u64>() {
            self.seed_default
                .try_get_as::<u64>(symbol)?
                .map(|factory| factory().to_string())
        } else {
            self.text_default
                .try_get_as::<String>(symbol)?
                .map(|factory| factory())
        };

        Ok(match default {
            Some(default) => format!(
                "  {:<10} {:<9} [default: {}]",
                symbol.name(),
                symbol.kind(),
                default
            ),
            None => format!("  {:<10} {}", symbol.name(), symbol.kind()),
        })
    }
}
