//! 搜索引擎
//!
//! 实现带 Alpha-Beta 剪枝的固定深度 Minimax 搜索。
//! 整个递归共享同一个可变棋盘句柄：每层先执行走法、
//! 解决完子树后撤销，再轮到下一个兄弟走法。

use chess_rules::RulesEngine;

use crate::evaluate::Evaluator;

/// 搜索窗口的正无穷（取反后仍在 i32 范围内）
pub const INFINITY: i32 = i32::MAX;

/// 作用域内的走法执行
///
/// 创建时执行走法，离开作用域时保证撤销。剪枝提前跳出
/// 或递归中途 panic 都不会让棋盘停留在已变更状态。
pub(crate) struct ScopedMove<'a, R: RulesEngine> {
    board: &'a mut R,
}

impl<'a, R: RulesEngine> ScopedMove<'a, R> {
    /// 执行走法并获得守卫
    pub fn apply(board: &'a mut R, mv: R::Move) -> Self {
        board.apply_move(mv);
        Self { board }
    }

    /// 访问已变更的棋盘
    pub fn board(&mut self) -> &mut R {
        self.board
    }
}

impl<R: RulesEngine> Drop for ScopedMove<'_, R> {
    fn drop(&mut self) {
        self.board.undo_move();
    }
}

/// 搜索器
pub struct Searcher<'a> {
    evaluator: &'a Evaluator,
    nodes_searched: u64,
}

impl<'a> Searcher<'a> {
    /// 创建搜索器
    pub fn new(evaluator: &'a Evaluator) -> Self {
        Self {
            evaluator,
            nodes_searched: 0,
        }
    }

    /// Minimax 搜索
    ///
    /// `maximizing` 为 true 时当前层取子节点最大值，否则取最小值。
    /// (alpha, beta) 按值下传，被已完成的兄弟结果收窄；
    /// `beta <= alpha` 时剩余兄弟不可能影响最终决策，直接截断。
    pub fn minimax<R: RulesEngine>(
        &mut self,
        board: &mut R,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes_searched += 1;

        // 到达深度限制或终局，返回静态评估
        if depth == 0 || board.is_checkmate() || board.is_draw() {
            return self.evaluator.evaluate(board);
        }

        let moves = board.legal_moves();
        // 无子可动等价于终局，交给评估函数判定
        if moves.is_empty() {
            return self.evaluator.evaluate(board);
        }

        if maximizing {
            let mut best = -INFINITY;
            for mv in moves {
                let mut applied = ScopedMove::apply(board, mv);
                let score = self.minimax(applied.board(), depth - 1, alpha, beta, false);
                drop(applied);

                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break; // Beta 截断
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for mv in moves {
                let mut applied = ScopedMove::apply(board, mv);
                let score = self.minimax(applied.board(), depth - 1, alpha, beta, true);
                drop(applied);

                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break; // Alpha 截断
                }
            }
            best
        }
    }

    /// 已搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}
