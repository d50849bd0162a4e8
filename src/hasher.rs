use sha2::{Digest, Sha256};

/// 区块头字段分隔符
pub const HEADER_SEPARATOR: char = '|';

/// 计算字符串的SHA-256哈希，返回64位小写十六进制字符串
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// 双重SHA-256：第二轮对第一轮的十六进制字符串再次哈希
///
/// 工作量证明方案中惯用双重哈希。输入视为不透明文本，
/// 空字符串和包含分隔符的字符串无需特殊处理。
pub fn double_sha256(input: &str) -> String {
    let first = sha256_hex(input);
    sha256_hex(&first)
}

/// 拼接区块头: `前置哈希|数据|nonce`
pub fn build_header(prev_hash: &str, data: &str, nonce: u64) -> String {
    format!(
        "{}{}{}{}{}",
        prev_hash, HEADER_SEPARATOR, data, HEADER_SEPARATOR, nonce
    )
}
