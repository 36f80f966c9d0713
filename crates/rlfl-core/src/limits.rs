/// Hard ceilings applied by the registries and engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Live grids.
    pub max_grids: usize,
    /// Live stored paths.
    pub max_paths: usize,
    /// Live projections.
    pub max_projections: usize,
    /// Live path maps per grid.
    pub max_pathmaps: usize,
    /// Grid width must be strictly below this.
    pub max_width: i32,
    /// Grid height must be strictly below this.
    pub max_height: i32,
    /// FOV and projection radii must be strictly below this.
    pub max_radius: u32,
    /// Range used when a trace is requested without one.
    pub max_range: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_grids: 12,
            max_paths: 12,
            max_projections: 12,
            max_pathmaps: 12,
            max_width: 5000,
            max_height: 5000,
            max_radius: 60,
            max_range: 60,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let l: Limits = serde_json::from_str(r#"{"max_paths": 40}"#).unwrap();
        assert_eq!(l.max_paths, 40);
        assert_eq!(l.max_grids, Limits::default().max_grids);
    }
}
