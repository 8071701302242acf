//! 规则引擎抽象
//!
//! 提供 RulesEngine trait 使搜索层与具体规则实现解耦，
//! 便于替换规则后端或在测试中注入最小实现。

use std::fmt::Debug;

use crate::piece::{PieceKind, Side, Square};

/// 规则引擎 trait（核心抽象，供搜索层使用）
///
/// 实现者持有完整的棋局状态并负责所有合法性判定。
/// 走法在原地执行，必须按严格的后进先出顺序撤销：
/// 搜索的每一层先执行走法、递归解决子树、再撤销，
/// 同一时刻只有当前栈帧持有已变更的棋盘。
pub trait RulesEngine {
    /// 走法的不透明表示，搜索层只负责原样传回
    type Move: Copy + PartialEq + Debug;

    /// 枚举当前走子方的所有合法走法（单次调用内顺序稳定）
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// 原地执行走法，必须可撤销
    fn apply_move(&mut self, mv: Self::Move);

    /// 撤销最近一次执行的走法；没有匹配的 apply 时不做任何事
    fn undo_move(&mut self);

    /// 当前走子方是否被将死
    fn is_checkmate(&self) -> bool;

    /// 是否为和棋（逼和、子力不足、三次重复、五十步）
    fn is_draw(&self) -> bool;

    /// 当前走子方
    fn side_to_move(&self) -> Side;

    /// 获取指定格子上的棋子
    fn piece_at(&self, sq: Square) -> Option<(PieceKind, Side)>;

    /// 当前局面的 FEN 序列化
    fn fen(&self) -> String;
}
