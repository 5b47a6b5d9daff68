use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 7;

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// `job_<epoch-ms>_<suffix>`. The timestamp prefix keeps ids roughly
/// sortable by creation time; the suffix disambiguates same-millisecond
/// writes.
pub fn job_id(timestamp_ms: i64) -> String {
    format!("job_{}_{}", timestamp_ms, random_suffix())
}

/// `req_<epoch-ms>_<suffix>`, same scheme as job ids.
pub fn request_id(timestamp_ms: i64) -> String {
    format!("req_{}_{}", timestamp_ms, random_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_embed_timestamp_and_suffix() {
        let id = job_id(1_700_000_000_000);
        assert!(id.starts_with("job_1700000000000_"));
        assert_eq!(id.len(), "job_1700000000000_".len() + SUFFIX_LEN);
    }

    #[test]
    fn suffixes_are_base36() {
        let id = request_id(42);
        let suffix = id.rsplit('_').next().unwrap();
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
