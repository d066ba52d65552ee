use cfgm_core::errors::{CfgmError, ErrorInfo};
use cfgm_core::{DegreeSequence, Edge, NodeKey};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Order-sensitive hash of a single instance.
///
/// Two instances hash equal only when they list the same edges, with the
/// same orientation, in the same order.
pub fn instance_hash<K: Serialize>(edges: &[Edge<K>]) -> Result<String, CfgmError> {
    let mut hasher = Sha256::new();
    encode_edges(edges, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Order-sensitive hash of a whole ensemble.
pub fn ensemble_hash<K: Serialize>(instances: &[Vec<Edge<K>>]) -> Result<String, CfgmError> {
    let mut hasher = Sha256::new();
    hasher.update((instances.len() as u64).to_le_bytes());
    for edges in instances {
        encode_edges(edges, &mut hasher)?;
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Hash of the edge multiset, ignoring edge order and endpoint orientation.
pub fn multiset_hash<K: NodeKey + Serialize>(edges: &[Edge<K>]) -> Result<String, CfgmError> {
    let mut encoded = Vec::with_capacity(edges.len());
    for edge in edges {
        let (low, high) = if edge.source <= edge.target {
            (&edge.source, &edge.target)
        } else {
            (&edge.target, &edge.source)
        };
        let low = key_bytes(low)?;
        let mut bytes = (low.len() as u64).to_le_bytes().to_vec();
        bytes.extend(low);
        bytes.extend(key_bytes(high)?);
        encoded.push(bytes);
    }
    encoded.sort();
    let mut hasher = Sha256::new();
    hasher.update((encoded.len() as u64).to_le_bytes());
    for bytes in encoded {
        update_slice(&bytes, &mut hasher);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Hash of a degree sequence, sensitive to node order.
pub fn degree_sequence_hash<K: NodeKey + Serialize>(
    degrees: &DegreeSequence<K>,
) -> Result<String, CfgmError> {
    let mut hasher = Sha256::new();
    hasher.update((degrees.len() as u64).to_le_bytes());
    for (node, degree) in degrees.iter() {
        update_slice(&key_bytes(node)?, &mut hasher);
        hasher.update((degree as u64).to_le_bytes());
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn encode_edges<K: Serialize>(edges: &[Edge<K>], hasher: &mut Sha256) -> Result<(), CfgmError> {
    hasher.update((edges.len() as u64).to_le_bytes());
    for edge in edges {
        update_slice(&key_bytes(&edge.source)?, hasher);
        update_slice(&key_bytes(&edge.target)?, hasher);
    }
    Ok(())
}

fn key_bytes<K: Serialize>(key: &K) -> Result<Vec<u8>, CfgmError> {
    serde_json::to_vec(key)
        .map_err(|err| CfgmError::Serde(ErrorInfo::new("hash-node-key", err.to_string())))
}

fn update_slice(bytes: &[u8], hasher: &mut Sha256) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
