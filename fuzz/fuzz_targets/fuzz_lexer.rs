#![no_main]

use esflow::codepoint::CodePointStream;
use esflow::engine::{Engine, Outcome};
use esflow::lexer::{next_token, LexerState};
use esflow::span::SourceUrl;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(data) = std::str::from_utf8(data) else {
        return;
    };

    let mut stream = CodePointStream::new(SourceUrl::anonymous());
    let mut engine: Engine<esflow::codepoint::CodePoint> = Engine::new();
    engine.feed(stream.feed(data));
    engine.close();

    let mut state = LexerState::new();
    loop {
        match engine.run_once(|e| next_token(e, &mut state)) {
            Outcome::Emitted(token) => {
                let _ = token.span().len();
            }
            Outcome::EndOfInput | Outcome::NeedMore => break,
            Outcome::Failed(_) | Outcome::Invariant(_) => break,
        }
    }
});
