// Grid dimensions and layout spacing
use crate::grid::traits::{GridError, GridResult};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Space between slots (rem)
    pub gap: f32,
    /// Space around the outer edge of the grid (rem)
    pub padding: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            gap: 0.5,
            padding: 1.0,
        }
    }
}

impl GridConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Number of slots, `None` if `rows * cols` does not fit in a `usize`
    pub fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Check that the grid can actually be built from this config
    pub fn validate(&self) -> GridResult<()> {
        // The mesh is one flat allocation, which can never exceed isize::MAX
        let fits = self
            .cell_count()
            .is_some_and(|n| n > 0 && n <= isize::MAX as usize);
        if !fits {
            return Err(GridError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        for spacing in [self.gap, self.padding] {
            if !spacing.is_finite() || spacing < 0.0 {
                return Err(GridError::InvalidGap(spacing));
            }
        }
        Ok(())
    }

    /// Parse and validate a config from JSON
    pub fn from_json_str(json: &str) -> GridResult<Self> {
        let config: GridConfig = serde_json::from_str(json)
            .map_err(|e| GridError::ConfigurationError(format!("invalid grid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> GridResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            GridError::ConfigurationError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}
