//! Console rendering of server replies.
//!
//! Rendering is a pure function from a response to the lines the operator
//! sees, so display policy stays testable without a terminal. Whether a
//! result matrix body appears is decided here and only here; by the time a
//! response reaches this module its payload has already been consumed from
//! the wire, so suppressing the body never costs stream alignment.

use matsum_core::Response;

/// Renders one response as the operator-facing console text.
///
/// `max_printed_size` is the largest matrix edge length whose body is still
/// printed; larger results get a notice instead.
pub fn render(response: &Response, max_printed_size: u32) -> String {
    match response {
        Response::Pong => "> pong received".to_string(),
        Response::Stored { id } => format!("> matrix pair stored with id: {id}"),
        Response::Pending { id } => format!("> no calculation yet for id: {id}"),
        Response::Result { id, matrix } => {
            let mut out = format!(
                "> there is a calculation for id, size: {id} {}",
                matrix.size()
            );
            if matrix.size() > max_printed_size {
                out.push_str("\n> matrix too big to print");
            } else {
                out.push_str("\n> matrix:");
                for row in matrix.rows() {
                    out.push('\n');
                    out.push_str(&render_row(row));
                }
            }
            out
        }
        Response::Unknown(opcode) => format!("> unknown received: {opcode}"),
    }
}

/// One bracketed, width-aligned matrix row.
fn render_row(row: &[u32]) -> String {
    let mut line = String::from("[ ");
    for value in row {
        line.push_str(&format!("{value:5} "));
    }
    line.push(']');
    line
}

/// Prints a rendered response to stdout.
pub fn print(response: &Response, max_printed_size: u32) {
    println!("{}", render(response, max_printed_size));
}

/// The startup banner listing the available commands.
pub fn banner() -> String {
    "Connection established.\n\
     Commands:\n\
     \t> ping: sends a ping to the server\n\
     \t> send_<N>: generates and sends two NxN matrices (k suffix allowed, e.g. send_10k)\n\
     \t> sum <id>: sums the matrices with the given id\n\
     \t> status <id>: gets the status of the sum of pair with the given id"
        .to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
