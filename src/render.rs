pub(crate) mod fit;
pub(crate) mod renderer;
pub(crate) mod scheduler;
pub(crate) mod surface;
