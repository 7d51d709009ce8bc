//! BM25 term scoring for the in-memory index

/// Term frequency saturation
pub const BM25_K1: f32 = 1.2;
/// Length normalization strength
pub const BM25_B: f32 = 0.75;

/// Collection statistics for one field
#[derive(Debug, Clone, Copy)]
pub struct FieldStats {
    /// Documents that have the field
    pub doc_count: u32,
    /// Average token count of the field
    pub avg_length: f32,
}

/// BM25 contribution of one term in one document field.
///
/// `df` is the number of documents containing the term in this field.
pub fn bm25(tf: u32, df: u32, doc_length: u32, stats: FieldStats) -> f32 {
    if tf == 0 || stats.doc_count == 0 {
        return 0.0;
    }
    let n = stats.doc_count as f32;
    let df = df as f32;
    let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();

    let tf = tf as f32;
    let avgdl = if stats.avg_length > 0.0 { stats.avg_length } else { 1.0 };
    let norm = 1.0 - BM25_B + BM25_B * doc_length as f32 / avgdl;
    idf * (tf * (BM25_K1 + 1.0)) / (tf + BM25_K1 * norm)
}
