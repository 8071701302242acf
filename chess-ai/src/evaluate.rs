//! 棋局评估函数
//!
//! 始终以白方视角打分：正值对白方有利，负值对黑方有利。

use chess_rules::{PieceKind, RulesEngine, Side, Square};

use crate::config::EvaluationWeights;

/// 将死哨兵分值，必须压倒任何子力与位置分的总和
pub const MATE_SCORE: i32 = 10_000_000;

/// 和棋分值
pub const DRAW_SCORE: i32 = 0;

/// 兵每向升变行推进一格的奖励
const PAWN_ADVANCE_BONUS: i32 = 10;

/// 占据中心格的基础奖励
const CENTER_BONUS: i32 = 10;

/// 王周围每个己方棋子的保护分
const KING_SHIELD_BONUS: i32 = 5;

/// 同线每个重叠兵的惩罚
const DOUBLED_PAWN_PENALTY: i32 = 10;

/// 棋子-格子分值表（白方视角，黑方按 rank 镜像）
/// 索引为 rank * 8 + file，rank 0 是白方底线
mod position_tables {
    /// 兵
    pub const PAWN: [i32; 64] = [
        0, 0, 0, 0, 0, 0, 0, 0, //
        5, 10, 10, -20, -20, 10, 10, 5, //
        5, -5, -10, 0, 0, -10, -5, 5, //
        0, 0, 0, 20, 20, 0, 0, 0, //
        5, 5, 10, 25, 25, 10, 5, 5, //
        10, 10, 20, 30, 30, 20, 10, 10, //
        50, 50, 50, 50, 50, 50, 50, 50, //
        0, 0, 0, 0, 0, 0, 0, 0, //
    ];

    /// 马
    pub const KNIGHT: [i32; 64] = [
        -50, -40, -30, -30, -30, -30, -40, -50, //
        -40, -20, 0, 0, 0, 0, -20, -40, //
        -30, 0, 10, 15, 15, 10, 0, -30, //
        -30, 0, 15, 20, 20, 15, 0, -30, //
        -30, 5, 15, 20, 20, 15, 5, -30, //
        -30, 5, 10, 15, 15, 10, 5, -30, //
        -40, -20, 0, 5, 5, 0, -20, -40, //
        -50, -40, -30, -30, -30, -30, -40, -50, //
    ];
}

/// 评估器
#[derive(Debug, Clone)]
pub struct Evaluator {
    weights: EvaluationWeights,
}

impl Evaluator {
    /// 使用给定权重创建评估器
    pub fn new(weights: EvaluationWeights) -> Self {
        Self { weights }
    }

    /// 当前权重
    pub fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }

    /// 评估局面（白方视角）
    ///
    /// 除机动性探测（执行一个合法走法并立即撤销）外没有任何副作用，
    /// 返回时棋盘与进入时完全一致。
    pub fn evaluate<R: RulesEngine>(&self, board: &mut R) -> i32 {
        // 终局优先：被将死的一方是当前走子方
        if board.is_checkmate() {
            return match board.side_to_move() {
                Side::White => -MATE_SCORE,
                Side::Black => MATE_SCORE,
            };
        }
        if board.is_draw() {
            return DRAW_SCORE;
        }

        let mut score = self.material_score(board);

        if self.weights.mobility > 0 {
            score += self.mobility_score(board);
        }
        if self.weights.center_control > 0 {
            score += self.center_score(board);
        }
        if self.weights.king_protection > 0 {
            score += self.king_shield_score(board);
        }
        if self.weights.pawn_structure > 0 {
            score += self.pawn_structure_score(board);
        }

        score
    }

    /// 子力分：基础分值加兵的推进奖励，位置权重非零时叠加棋子-格子表
    fn material_score<R: RulesEngine>(&self, board: &R) -> i32 {
        let mut score = 0;
        for sq in Square::all() {
            let Some((kind, side)) = board.piece_at(sq) else {
                continue;
            };
            let mut piece_score = kind.value();
            if kind == PieceKind::Pawn {
                piece_score += PAWN_ADVANCE_BONUS * advancement(sq, side);
            }
            if self.weights.position > 0 {
                piece_score += position_bonus(sq, kind, side);
            }
            match side {
                Side::White => score += piece_score,
                Side::Black => score -= piece_score,
            }
        }
        score
    }

    /// 机动性差值
    ///
    /// 对手的可走步数通过执行一个合法走法换边统计后撤销得到；
    /// 没有可用的探测走法时该项退化为 0。
    fn mobility_score<R: RulesEngine>(&self, board: &mut R) -> i32 {
        let side = board.side_to_move();
        let own_moves = board.legal_moves();
        let Some(&probe) = own_moves.first() else {
            return 0;
        };
        let own = own_moves.len() as i32;

        board.apply_move(probe);
        let opponent = board.legal_moves().len() as i32;
        board.undo_move();

        let diff = match side {
            Side::White => own - opponent,
            Side::Black => opponent - own,
        };
        diff * self.weights.mobility as i32
    }

    /// 中心控制分
    fn center_score<R: RulesEngine>(&self, board: &R) -> i32 {
        let mut score = 0;
        for sq in Square::CENTER {
            if let Some((_, side)) = board.piece_at(sq) {
                let bonus = CENTER_BONUS * self.weights.center_control as i32;
                match side {
                    Side::White => score += bonus,
                    Side::Black => score -= bonus,
                }
            }
        }
        score
    }

    /// 王的保护分：王周围八格内的己方棋子数
    fn king_shield_score<R: RulesEngine>(&self, board: &R) -> i32 {
        let mut score = 0;
        for sq in Square::all() {
            let Some((PieceKind::King, side)) = board.piece_at(sq) else {
                continue;
            };
            let mut shield = 0;
            for dx in -1..=1i8 {
                for dy in -1..=1i8 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let Some(adj) = sq.offset(dx, dy) else {
                        continue;
                    };
                    if matches!(board.piece_at(adj), Some((_, s)) if s == side) {
                        shield += 1;
                    }
                }
            }
            let bonus = shield * KING_SHIELD_BONUS * self.weights.king_protection as i32;
            match side {
                Side::White => score += bonus,
                Side::Black => score -= bonus,
            }
        }
        score
    }

    /// 兵形分：同一线上的重叠兵惩罚
    fn pawn_structure_score<R: RulesEngine>(&self, board: &R) -> i32 {
        let mut white_files = [0i32; 8];
        let mut black_files = [0i32; 8];
        for sq in Square::all() {
            if let Some((PieceKind::Pawn, side)) = board.piece_at(sq) {
                match side {
                    Side::White => white_files[sq.file as usize] += 1,
                    Side::Black => black_files[sq.file as usize] += 1,
                }
            }
        }

        let penalty = DOUBLED_PAWN_PENALTY * self.weights.pawn_structure as i32;
        let mut score = 0;
        for file in 0..8 {
            score -= (white_files[file] - 1).max(0) * penalty;
            score += (black_files[file] - 1).max(0) * penalty;
        }
        score
    }
}

/// 兵从本方底线推进的格数
fn advancement(sq: Square, side: Side) -> i32 {
    match side {
        Side::White => sq.rank as i32,
        Side::Black => 7 - sq.rank as i32,
    }
}

/// 位置加成分（黑方按 rank 镜像取表）
fn position_bonus(sq: Square, kind: PieceKind, side: Side) -> i32 {
    let index = match side {
        Side::White => sq.to_index(),
        Side::Black => (7 - sq.rank as usize) * 8 + sq.file as usize,
    };
    match kind {
        PieceKind::Pawn => position_tables::PAWN[index],
        PieceKind::Knight => position_tables::KNIGHT[index],
        // 其他棋子暂不加位置分
        _ => 0,
    }
}
