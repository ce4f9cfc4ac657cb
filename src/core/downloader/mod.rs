mod client;

pub use client::ArtifactDownloader;
