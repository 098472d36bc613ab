/// Tag written into the generated comment lines.
pub const DEFAULT_TOOL_NAME: &str = "tbn-gen";

/// Paths of this many bytes or more are rejected.
pub const DEFAULT_MAX_PATH_LEN: usize = 256;

pub const DEFAULT_DEGENERATE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct Config {
    pub tool_name: String,
    pub max_path_len: usize,
    /// Smallest UV determinant, relative to the longer UV edge squared, still
    /// treated as a valid triangle.
    pub degenerate_epsilon: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            max_path_len: DEFAULT_MAX_PATH_LEN,
            degenerate_epsilon: DEFAULT_DEGENERATE_EPSILON,
        }
    }
}
