//! AI 引擎
//!
//! 按难度选择走法：难度映射搜索深度，低难度按固定概率随机走子
//! 模拟较弱的对手，其余情况打乱根走法后逐一搜索取最优。

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use chess_rules::{RulesEngine, Side};

use crate::config::{AiConfig, WEAKENING_PROBABILITY};
use crate::error::AiError;
use crate::evaluate::Evaluator;
use crate::search::{ScopedMove, Searcher, INFINITY};

/// AI 引擎
///
/// 随机源作为类型参数注入，测试中可以换成确定性的实现。
pub struct AiEngine<G: Rng = ChaCha8Rng> {
    config: AiConfig,
    evaluator: Evaluator,
    rng: G,
    nodes_searched: u64,
}

impl AiEngine<ChaCha8Rng> {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: u8) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    /// 使用固定种子创建（可复现的对局和测试）
    pub fn with_seed(config: AiConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<G: Rng> AiEngine<G> {
    /// 注入随机源创建
    pub fn with_rng(config: AiConfig, rng: G) -> Self {
        let evaluator = Evaluator::new(config.weights);
        Self {
            config,
            evaluator,
            rng,
            nodes_searched: 0,
        }
    }

    /// 当前配置
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 最近一次选择搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 选择走法
    ///
    /// 前置条件：局面未终局。返回的走法一定取自进入时的合法走法列表，
    /// 返回后棋盘与进入时完全一致。
    pub fn select_move<R: RulesEngine>(&mut self, board: &mut R) -> Result<R::Move, AiError> {
        self.nodes_searched = 0;

        let mut moves = board.legal_moves();
        if moves.is_empty() || board.is_checkmate() || board.is_draw() {
            return Err(AiError::TerminalPosition);
        }

        // 唯一合法走法直接返回，不进入搜索
        if moves.len() == 1 {
            debug!(mv = ?moves[0], "single legal move, skipping search");
            return Ok(moves[0]);
        }

        // 低难度按固定概率随机走子
        if self.config.weakening_enabled() && self.rng.gen::<f32>() < WEAKENING_PROBABILITY {
            if let Some(&mv) = moves.choose(&mut self.rng) {
                debug!(difficulty = self.config.difficulty, mv = ?mv, "weakened: random move");
                return Ok(mv);
            }
        }

        // 打乱走法顺序，让同分走法的取舍均匀随机
        moves.shuffle(&mut self.rng);

        let depth = self.config.search_depth();
        let maximizing = board.side_to_move() == Side::White;
        let mut searcher = Searcher::new(&self.evaluator);
        let mut best_move = moves[0];
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            let mut applied = ScopedMove::apply(board, mv);
            let score =
                searcher.minimax(applied.board(), depth - 1, -INFINITY, INFINITY, !maximizing);
            drop(applied);

            // 只接受严格更优，同分时先到者胜出
            let improved = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improved {
                best_score = score;
                best_move = mv;
            }
        }

        self.nodes_searched = searcher.nodes_searched();
        debug!(
            difficulty = self.config.difficulty,
            depth,
            nodes = self.nodes_searched,
            score = best_score,
            mv = ?best_move,
            "search finished"
        );
        Ok(best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::StandardBoard;

    #[test]
    fn test_select_from_initial_position() {
        let mut board = StandardBoard::start_pos();
        let mut engine = AiEngine::with_seed(AiConfig::from_difficulty(3), 7);

        let mv = engine.select_move(&mut board).unwrap();
        assert!(board.legal_moves().contains(&mv));
        assert!(engine.nodes_searched() > 0);
    }

    #[test]
    fn test_terminal_position_is_error() {
        // 白方已被将死
        let mut board =
            StandardBoard::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let mut engine = AiEngine::with_seed(AiConfig::default(), 7);
        assert_eq!(
            engine.select_move(&mut board).unwrap_err(),
            AiError::TerminalPosition
        );
    }

    #[test]
    fn test_board_unchanged_after_selection() {
        let mut board = StandardBoard::start_pos();
        let before = board.fen();
        let mut engine = AiEngine::with_seed(AiConfig::from_difficulty(2), 99);

        engine.select_move(&mut board).unwrap();
        assert_eq!(board.fen(), before);
    }
}
