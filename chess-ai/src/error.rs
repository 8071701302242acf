//! 错误类型定义

use thiserror::Error;

/// AI 层错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// 在已终局的局面上请求走法（调用方违反前置条件）
    #[error("Position is already terminal")]
    TerminalPosition,
}
