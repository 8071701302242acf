//! AI 配置与评估权重

use serde::{Deserialize, Serialize};

/// 默认难度等级
pub const DEFAULT_DIFFICULTY: u8 = 3;

/// 难度越界时使用的搜索深度
pub const DEFAULT_DEPTH: u8 = 3;

/// 低难度下随机走子的概率
pub const WEAKENING_PROBABILITY: f32 = 0.3;

/// 评估权重
///
/// 各项均为非负整数，搜索期间只读。字段名与前端设置保持一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluationWeights {
    /// 子力价值
    pub material: u32,
    /// 位置分（棋子-格子表）
    pub position: u32,
    /// 机动性（可走步数差）
    pub mobility: u32,
    /// 王的保护
    pub king_protection: u32,
    /// 兵形结构
    pub pawn_structure: u32,
    /// 中心控制
    pub center_control: u32,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            material: 100,
            position: 10,
            mobility: 5,
            king_protection: 3,
            pawn_structure: 2,
            center_control: 4,
        }
    }
}

impl EvaluationWeights {
    /// 只保留子力项的权重（测试和基准用）
    pub fn material_only() -> Self {
        Self {
            material: 100,
            position: 0,
            mobility: 0,
            king_protection: 0,
            pawn_structure: 0,
            center_control: 0,
        }
    }
}

/// AI 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// 难度等级 1-5
    pub difficulty: u8,
    /// 评估权重
    pub weights: EvaluationWeights,
}

impl AiConfig {
    /// 从难度创建，使用默认权重
    pub fn from_difficulty(difficulty: u8) -> Self {
        Self {
            difficulty,
            weights: EvaluationWeights::default(),
        }
    }

    /// 难度到搜索深度的映射（1→1 … 5→5，越界取默认深度）
    pub fn search_depth(&self) -> u8 {
        match self.difficulty {
            d @ 1..=5 => d,
            _ => DEFAULT_DEPTH,
        }
    }

    /// 低难度（3 以下）启用随机弱化
    pub fn weakening_enabled(&self) -> bool {
        self.difficulty < 3
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(DEFAULT_DIFFICULTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_depth_map() {
        for d in 1..=5 {
            assert_eq!(AiConfig::from_difficulty(d).search_depth(), d);
        }
    }

    #[test]
    fn test_out_of_range_difficulty_defaults() {
        assert_eq!(AiConfig::from_difficulty(0).search_depth(), DEFAULT_DEPTH);
        assert_eq!(AiConfig::from_difficulty(9).search_depth(), DEFAULT_DEPTH);
    }

    #[test]
    fn test_weakening_only_below_medium() {
        assert!(AiConfig::from_difficulty(1).weakening_enabled());
        assert!(AiConfig::from_difficulty(2).weakening_enabled());
        assert!(!AiConfig::from_difficulty(3).weakening_enabled());
        assert!(!AiConfig::from_difficulty(5).weakening_enabled());
    }

    #[test]
    fn test_weights_from_settings_json() {
        // 字段名与原始设置对象一致
        let json = r#"{
            "material": 100,
            "position": 10,
            "mobility": 5,
            "kingProtection": 3,
            "pawnStructure": 2,
            "centerControl": 4
        }"#;
        let weights: EvaluationWeights = serde_json::from_str(json).unwrap();
        assert_eq!(weights, EvaluationWeights::default());
    }

    #[test]
    fn test_weights_missing_fields_default() {
        let weights: EvaluationWeights = serde_json::from_str(r#"{"mobility": 0}"#).unwrap();
        assert_eq!(weights.mobility, 0);
        assert_eq!(weights.material, 100);
    }
}
