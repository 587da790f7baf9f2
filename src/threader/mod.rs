mod cluster;
mod encode;

pub use cluster::{
    distance_cluster, hardmax, masked_distance, thread_haplotypes, update_prototypes, Prototype,
    ThreadingParams, ThreadingResult,
};
pub use encode::{encode_base, onehot_decode, onehot_encode, BaseVector, EncodedRow, NUM_CHANNELS};
