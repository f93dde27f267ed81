/// Everything the user (or the clock) can ask the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NavigateBack,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoTop,
    GoBottom,
    /// Enter: submit on the main screen, open/select in the file picker.
    DrillIn,
    Submit,
    OpenFilePicker,
    ToggleFullText,
    ToggleHelp,
    /// Text pasted into the terminal; a dropped file arrives this way.
    Drop(String),
    Resize,
    Tick,
    None,
}
