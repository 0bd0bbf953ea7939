pub mod ollama;
pub mod stable_diffusion;
pub mod upstream;
