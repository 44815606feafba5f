/// failures reading or writing cash-out tables and reports,
/// and card values outside the deck.
/// simulation itself never fails; malformed cells degrade to unknowns.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected 3 table blocks (hard, soft, split), found {0}")]
    Blocks(usize),
    #[error("block {0:?} has a title but no column header")]
    Header(String),
    #[error("unrecognized dealer column {0:?}")]
    Column(String),
    #[error("invalid card value {0}")]
    Card(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
