use crate::factors::Factor;

const USAGE: &str = "\
Finance Factors Calculator

Usage examples:
  A_P(2.5%, 10)
  F_A(7%, 12)
  P_F(5, 3)          # the % may be omitted; the rate is always a percentage
  A_G(4%, 8)
  A_P(5%, 10) * 1000 # inside expressions write 5% for five percent";

const NOTES: &str = "\
Notes:
  - A_G assumes the gradient 0, G, 2G, ..., (n-1)G at periods 1..n.
  - P_G is computed as A_G * P_A.
  - i = 0 uses the limit of each formula.

Commands:
  help     reprint this message
  cls      clear the screen and the current history
  case     start a case with its own variables and history
  endcase  end the case and restore the previous variables
  x = ...  assign a variable; type its name to show it
  quit     leave (also exit or a blank line)";

/// Builds the text printed for `help`.
pub fn help_text() -> String {
    let mut text = String::from(USAGE);
    text.push_str("\n\nFactors:\n");
    for factor in Factor::ALL {
        text.push_str(&format!("  - {:<4} : {}\n", factor.name(), factor.description()));
    }
    text.push('\n');
    text.push_str(NOTES);
    text
}
