use crate::{Board, Place};

/// Draws the board with white's first row at the bottom.
///
/// Pieces are shown by their [label](crate::Piece::label), empty cells as
/// `·` and the empty centre cell as `+`.
pub fn visualize_board(board: &Board) -> String {
    let size = board.size();
    // Casting is fine, the board size is at most MAX_BOARD_SIZE
    let centre = Place::new((size / 2) as i32, (size / 2) as i32);

    // Draw the column letters and the top of the box
    let mut result = String::from("    ");
    for x in 0..size {
        result.push(' ');
        result.push(char::from(b'a' + x as u8));
    }
    result += "\n   ╭";
    for _ in 0..size {
        result += "──";
    }
    result += "─╮\n";

    for y in (0..size).rev() {
        result += &format!("{:>2} │", y + 1);
        for x in 0..size {
            let place = Place::new(x as i32, y as i32);
            result.push(' ');
            result.push(match board.get(place) {
                Some(piece) => piece.label(),
                None if place == centre => '+',
                None => '·',
            });
        }
        result += " │\n";
    }

    // Draw the bottom of the box
    result += "   ╰";
    for _ in 0..size {
        result += "──";
    }
    result += "─╯";
    result
}
