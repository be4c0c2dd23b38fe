mod common;
mod decay;
mod reduce;
