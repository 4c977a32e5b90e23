// =============================================================================
// CandleFrame: column-oriented candle series
// =============================================================================
//
// A time index plus an ordered list of named `f64` columns, every column
// aligned 1:1 with the index.  "No value" is `NaN` and flows through any
// arithmetic performed on it.
//
// Indicators never mutate the frame they are given: they clone it, append
// their derived columns and hand the copy back.

use anyhow::{bail, ensure, Result};
use chrono::NaiveDateTime;

use super::Candle;

/// Alias column names the indicators read from.
pub const MID_O: &str = "mid_o";
pub const MID_H: &str = "mid_h";
pub const MID_L: &str = "mid_l";
pub const MID_C: &str = "mid_c";
pub const VOLUME: &str = "volume";

/// Ordered candle series with named numeric columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandleFrame {
    index: Vec<NaiveDateTime>,
    columns: Vec<(String, Vec<f64>)>,
}

impl CandleFrame {
    /// Create a frame with the given time index and no columns.
    pub fn new(index: Vec<NaiveDateTime>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Build a frame from candles, with `open/high/low/close`, their `mid_*`
    /// aliases and, if any candle carries one, a `volume` column (missing
    /// entries count as zero volume).
    pub fn from_candles(candles: &[Candle]) -> Self {
        let mut frame = Self::new(candles.iter().map(|c| c.time).collect());

        let open: Vec<f64> = candles.iter().map(|c| c.open).collect();
        let high: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let low: Vec<f64> = candles.iter().map(|c| c.low).collect();
        let close: Vec<f64> = candles.iter().map(|c| c.close).collect();

        frame.put("open", open.clone());
        frame.put("high", high.clone());
        frame.put("low", low.clone());
        frame.put("close", close.clone());

        if candles.iter().any(|c| c.volume.is_some()) {
            let volume = candles.iter().map(|c| c.volume.unwrap_or(0.0)).collect();
            frame.put(VOLUME, volume);
        }

        frame.put(MID_O, open);
        frame.put(MID_H, high);
        frame.put(MID_L, low);
        frame.put(MID_C, close);
        frame
    }

    /// Add a column, builder style.
    pub fn with_column(mut self, name: &str, values: Vec<f64>) -> Result<Self> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    /// Derive `mid_o/mid_h/mid_l/mid_c` (and a lower-case `volume`) from
    /// `open/high/low/close/volume` columns, matched case-insensitively.
    ///
    /// Existing `mid_*` columns are overwritten; sources that are absent are
    /// skipped so a close-only frame still gets `mid_c`.
    #[must_use]
    pub fn with_mid_aliases(mut self) -> Self {
        const ALIASES: [(&str, &str); 5] = [
            ("open", MID_O),
            ("high", MID_H),
            ("low", MID_L),
            ("close", MID_C),
            ("volume", VOLUME),
        ];

        for (source, alias) in ALIASES {
            let found = self
                .columns
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(source))
                .map(|(name, values)| (name.clone(), values.clone()));

            if let Some((name, values)) = found {
                if name != alias {
                    self.put(alias, values);
                }
            }
        }
        self
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Like [`column`](Self::column) but a missing column is an error.
    pub fn require(&self, name: &str) -> Result<&[f64]> {
        match self.column(name) {
            Some(values) => Ok(values),
            None => bail!("missing required column `{name}`"),
        }
    }

    /// Insert or replace a column.  The length must match the index.
    pub fn insert_column(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        ensure!(
            values.len() == self.index.len(),
            "column `{name}` has {} values but the frame has {} rows",
            values.len(),
            self.index.len()
        );
        self.put(name, values);
        Ok(())
    }

    /// Remove a column, returning its values if it existed.
    pub fn drop_column(&mut self, name: &str) -> Option<Vec<f64>> {
        let pos = self.columns.iter().position(|(n, _)| n == name)?;
        Some(self.columns.remove(pos).1)
    }

    fn put(&mut self, name: &str, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.index.len());
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((name.to_string(), values)),
        }
    }

    // ---- typed accessors used by the indicators ---------------------------

    /// `mid_h`, `mid_l` in that order.
    pub(crate) fn hl(&self) -> Result<(&[f64], &[f64])> {
        Ok((self.require(MID_H)?, self.require(MID_L)?))
    }

    /// `mid_h`, `mid_l`, `mid_c` in that order.
    pub(crate) fn hlc(&self) -> Result<(&[f64], &[f64], &[f64])> {
        let (high, low) = self.hl()?;
        Ok((high, low, self.require(MID_C)?))
    }

    /// `mid_h`, `mid_l`, `mid_c`, `volume` in that order.
    pub(crate) fn hlcv(&self) -> Result<(&[f64], &[f64], &[f64], &[f64])> {
        let (high, low, close) = self.hlc()?;
        Ok((high, low, close, self.require(VOLUME)?))
    }

    /// Clone the frame and append the given derived columns.
    pub(crate) fn augmented<I>(&self, derived: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        let mut out = self.clone();
        for (name, values) in derived {
            out.insert_column(&name, values)?;
        }
        Ok(out)
    }
}
