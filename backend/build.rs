//! Build script compiling the gRPC service definitions when `grpc` is enabled.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/pvz.proto");

    #[cfg(feature = "grpc")]
    tonic_build::configure()
        .build_client(false)
        .compile_protos(&["proto/pvz.proto"], &["proto/"])?;

    Ok(())
}
