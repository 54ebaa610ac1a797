use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// Builds the tracing subscriber. `sink` is a writer factory such as
/// `std::io::stderr`, `std::io::stdout` or `std::io::sink`.
pub fn get_subscriber<Sink>(env_filter: &str, sink: Sink) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                env_filter.into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(sink))
}
