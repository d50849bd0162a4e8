use serde::Serialize;

/// 最小挖矿难度
pub const MIN_DIFFICULTY: u32 = 1;
/// 最大挖矿难度
pub const MAX_DIFFICULTY: u32 = 6;

/// 判断哈希是否满足难度目标：前`difficulty`位全部为'0'
///
/// 纯谓词，不做难度范围钳制。difficulty为0时空前缀要求恒成立；
/// difficulty超过哈希长度时返回false，不会越界。
pub fn meets_target(hash: &str, difficulty: usize) -> bool {
    let bytes = hash.as_bytes();
    bytes.len() >= difficulty && bytes[..difficulty].iter().all(|&b| b == b'0')
}

/// 挖矿难度，始终钳制在 [1, 6] 区间内
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Difficulty(u32);

impl Difficulty {
    pub fn new(value: i64) -> Self {
        let clamped = value.clamp(MIN_DIFFICULTY as i64, MAX_DIFFICULTY as i64);
        Difficulty(clamped as u32)
    }

    /// 解析文本输入，非法值回退为最小难度
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<i64>() {
            Ok(value) => Difficulty::new(value),
            Err(_) => Difficulty(MIN_DIFFICULTY),
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// 目标前缀字符串，如难度3对应"000"
    pub fn target_prefix(&self) -> String {
        "0".repeat(self.0 as usize)
    }

    /// 均匀哈希假设下的期望尝试次数: 16^难度
    pub fn expected_attempts(&self) -> u64 {
        16u64.pow(self.0)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(MIN_DIFFICULTY)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meets_target_basic() {
        assert!(meets_target("000abc", 3));
        assert!(!meets_target("00ab", 3), "Only 2 leading zeros");
        assert!(meets_target("0000abc", 3), "More zeros than required is fine");
    }

    #[test]
    fn test_meets_target_zero_difficulty_vacuous() {
        // 难度0超出有效域，但空前缀要求恒成立
        assert!(meets_target("ffff", 0));
        assert!(meets_target("", 0));
    }

    #[test]
    fn test_meets_target_difficulty_beyond_hash_length() {
        assert!(!meets_target("000", 100));
        assert!(!meets_target("", 1));
    }

    #[test]
    fn test_difficulty_clamping() {
        assert_eq!(Difficulty::new(0).value(), 1);
        assert_eq!(Difficulty::new(-5).value(), 1);
        assert_eq!(Difficulty::new(3).value(), 3);
        assert_eq!(Difficulty::new(7).value(), 6);
        assert_eq!(Difficulty::new(i64::MAX).value(), 6);
    }

    #[test]
    fn test_difficulty_parse_coercion() {
        assert_eq!(Difficulty::parse("4").value(), 4);
        assert_eq!(Difficulty::parse(" 2 ").value(), 2);
        assert_eq!(Difficulty::parse("abc").value(), 1);
        assert_eq!(Difficulty::parse("").value(), 1);
        assert_eq!(Difficulty::parse("99").value(), 6);
    }

    #[test]
    fn test_target_prefix() {
        assert_eq!(Difficulty::new(3).target_prefix(), "000");
        assert_eq!(Difficulty::new(1).target_prefix(), "0");
    }

    #[test]
    fn test_expected_attempts() {
        assert_eq!(Difficulty::new(1).expected_attempts(), 16);
        assert_eq!(Difficulty::new(6).expected_attempts(), 16_777_216);
    }
}
