//! Shared tool-facing API types, kept separate from `tessera-tools` so that
//! crates needing only the surface (not the built-in tool implementations)
//! can depend on it without pulling in the full tool registry.
