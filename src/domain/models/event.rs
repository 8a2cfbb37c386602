use tui_textarea::Input;

use super::GenerationError;
use super::GenerationResult;
use super::Notice;

pub enum Event {
    BackendNotice(Notice),
    GenerationResponse(u64, Result<GenerationResult, GenerationError>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLE(),
    KeyboardCTRLY(),
    KeyboardPaste(String),
    KeyboardTab(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
