//! Stock pipeline: translate → fetch → aggregate.

pub mod aggregator;
pub mod translator;

use tracing::info;

use crate::error::AppError;
use crate::models::{Stock, StockQuery};
use crate::provider::TimeSeriesSource;

/// Run the provider side of the pipeline for one request.
///
/// Errors come back unchanged in kind; mapping them to a response is the
/// handler's job.
pub async fn get_stock(source: &dyn TimeSeriesSource, query: &StockQuery) -> Result<Stock, AppError> {
    let request = translator::translate(query);
    let records = source.fetch_time_series(&request).await?;

    info!(
        symbol   = %query.symbol,
        function = request.function.as_str(),
        records  = records.len(),
        "📈 Time series fetched"
    );

    aggregator::aggregate(records)
}
