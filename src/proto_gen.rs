//! Rust types generated by `protobuf-codegen` from `resources/phonemetadata.proto`.

include!(concat!(env!("OUT_DIR"), "/proto_gen/mod.rs"));
