/// Program trait - a linked vertex + fragment shader pair

/// Active vertex input reported by a linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramInput {
    /// Input location
    pub location: u8,
    /// Number of f32 components (1..=4)
    pub component_count: u8,
}

/// Descriptor for creating a program
#[derive(Debug, Clone)]
pub struct ProgramDesc {
    /// Program name (used in diagnostics)
    pub name: String,
    /// Shader source text, as produced by the shader loader
    pub source: String,
}

/// Linked GPU program
pub trait Program: Send + Sync {
    /// Program name
    fn name(&self) -> &str;

    /// Active vertex inputs, in location order
    fn active_inputs(&self) -> Vec<ProgramInput>;
}
