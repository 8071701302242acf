//! 标准国际象棋规则后端
//!
//! 基于 pleco 的走法生成与规则判定实现 RulesEngine，
//! 扮演外部规则引擎协作者的角色，本仓库不自行实现合法性规则。

use pleco::{BitMove, Board, Piece, PieceType, Player, SQ};

use crate::engine::RulesEngine;
use crate::error::RulesError;
use crate::piece::{PieceKind, Side, Square};

/// pleco 棋盘适配器
///
/// 内部维护已执行走法栈，保证 apply/undo 严格配对。
pub struct StandardBoard {
    board: Board,
    applied: Vec<BitMove>,
}

impl StandardBoard {
    /// 创建初始局面
    pub fn start_pos() -> Self {
        Self {
            board: Board::start_pos(),
            applied: Vec::with_capacity(64),
        }
    }

    /// 从 FEN 字符串创建局面
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        Board::from_fen(fen)
            .map(|board| Self {
                board,
                applied: Vec::with_capacity(64),
            })
            .map_err(|e| RulesError::InvalidFen {
                reason: format!("{e:?}"),
            })
    }

    /// 访问内部 pleco 棋盘
    pub fn inner(&self) -> &Board {
        &self.board
    }

    /// 双方子力是否都不足以将死（王对王、王单轻子对王）
    fn insufficient_material(&self) -> bool {
        let mut minors = 0;
        for index in 0..64u8 {
            let piece = self.board.piece_at_sq(SQ(index));
            if piece == Piece::None {
                continue;
            }
            match piece.type_of() {
                PieceType::K => {}
                PieceType::N | PieceType::B => minors += 1,
                _ => return false,
            }
        }
        minors <= 1
    }
}

impl RulesEngine for StandardBoard {
    type Move = BitMove;

    fn legal_moves(&self) -> Vec<BitMove> {
        self.board.generate_moves().iter().copied().collect()
    }

    fn apply_move(&mut self, mv: BitMove) {
        self.board.apply_move(mv);
        self.applied.push(mv);
    }

    fn undo_move(&mut self) {
        if self.applied.pop().is_some() {
            self.board.undo_move();
        }
    }

    fn is_checkmate(&self) -> bool {
        self.board.checkmate()
    }

    fn is_draw(&self) -> bool {
        self.board.stalemate()
            || self.board.threefold_repetition()
            || self.board.rule_50() >= 100
            || self.insufficient_material()
    }

    fn side_to_move(&self) -> Side {
        match self.board.turn() {
            Player::White => Side::White,
            Player::Black => Side::Black,
        }
    }

    fn piece_at(&self, sq: Square) -> Option<(PieceKind, Side)> {
        let piece = self.board.piece_at_sq(SQ(sq.to_index() as u8));
        if piece == Piece::None {
            return None;
        }
        let kind = match piece.type_of() {
            PieceType::P => PieceKind::Pawn,
            PieceType::N => PieceKind::Knight,
            PieceType::B => PieceKind::Bishop,
            PieceType::R => PieceKind::Rook,
            PieceType::Q => PieceKind::Queen,
            PieceType::K => PieceKind::King,
            _ => return None,
        };
        let side = match piece.player()? {
            Player::White => Side::White,
            Player::Black => Side::Black,
        };
        Some((kind, side))
    }

    fn fen(&self) -> String {
        self.board.fen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_pos_legal_moves() {
        let board = StandardBoard::start_pos();
        // 开局双方各有 20 种走法
        assert_eq!(board.legal_moves().len(), 20);
        assert_eq!(board.side_to_move(), Side::White);
    }

    #[test]
    fn test_apply_undo_restores_fen() {
        let mut board = StandardBoard::start_pos();
        let before = board.fen();

        let moves = board.legal_moves();
        board.apply_move(moves[0]);
        assert_ne!(board.fen(), before);
        assert_eq!(board.side_to_move(), Side::Black);

        board.undo_move();
        assert_eq!(board.fen(), before);
    }

    #[test]
    fn test_undo_without_apply_is_noop() {
        let mut board = StandardBoard::start_pos();
        let before = board.fen();
        board.undo_move();
        assert_eq!(board.fen(), before);
    }

    #[test]
    fn test_piece_at_start_pos() {
        let board = StandardBoard::start_pos();
        // e2 白兵
        assert_eq!(
            board.piece_at(Square::new_unchecked(4, 1)),
            Some((PieceKind::Pawn, Side::White))
        );
        // e8 黑王
        assert_eq!(
            board.piece_at(Square::new_unchecked(4, 7)),
            Some((PieceKind::King, Side::Black))
        );
        // e4 空格
        assert_eq!(board.piece_at(Square::new_unchecked(4, 3)), None);
    }

    #[test]
    fn test_checkmate_detection() {
        // 愚人将杀后的局面，白方被将死
        let board =
            StandardBoard::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(board.is_checkmate());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_stalemate_is_draw() {
        // 黑方无子可动但未被将军
        let board = StandardBoard::from_fen("k7/8/1Q6/8/8/8/8/K7 b - - 0 1").unwrap();
        assert!(!board.is_checkmate());
        assert!(board.is_draw());
    }

    #[test]
    fn test_insufficient_material_is_draw() {
        // 王对王
        let board = StandardBoard::from_fen("k7/8/8/8/8/8/8/K7 w - - 0 1").unwrap();
        assert!(board.is_draw());

        // 王单马对王
        let board = StandardBoard::from_fen("k7/8/8/8/8/8/8/KN6 w - - 0 1").unwrap();
        assert!(board.is_draw());

        // 有后不是子力不足
        let board = StandardBoard::from_fen("k7/8/8/3q4/8/8/8/K7 w - - 0 1").unwrap();
        assert!(!board.is_draw());
    }

    #[test]
    fn test_invalid_fen() {
        let result = StandardBoard::from_fen("not a fen");
        assert!(matches!(result, Err(RulesError::InvalidFen { .. })));
    }
}
