/// Logical keys reported by a frontend.
///
/// Frontends translate their native key codes into this set; anything the
/// emulator does not care about becomes `Key::None`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Num1,
    Num2,
    A,
    C,
    D,
    P,
    S,
    Left,
    Right,
    Space,
    Escape,
    None,
}
