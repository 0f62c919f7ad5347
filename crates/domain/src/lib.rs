//! ドメインモデル
//!
//! Todo（タスク）と Event（イベント予約）の 2 つの独立した集約、
//! 入力検証、一覧クエリ、カレンダー表示用のプロジェクションを提供します。
//! I/O は一切行いません。

pub mod booking;
pub mod calendar;
pub mod errors;
pub mod todo;

pub use booking::*;
pub use calendar::*;
pub use errors::*;
pub use todo::*;
