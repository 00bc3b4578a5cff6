use divan::{black_box, Bencher};
use esflow::async_stream::{EcmaLexer, IncrementalLexer, IncrementalParse, ParseCheckpoint};
use esflow::ast::Statement;
use esflow::span::SourceUrl;
use esflow::token::Token;

fn main() {
    divan::main();
}

const SAMPLE_STATEMENTS: &[&str] = &[
    "console.log(\"hi\");",
    "a.b.c;",
    "f(a, b, c);",
    "window.document.title;",
];

fn generate_source(count: usize) -> String {
    let mut source = String::with_capacity(count * 24);
    for i in 0..count {
        source.push_str(SAMPLE_STATEMENTS[i % SAMPLE_STATEMENTS.len()]);
        source.push('\n');
    }
    source
}

fn generate_chunks(source: &str, chunk_size: usize) -> Vec<String> {
    source
        .as_bytes()
        .chunks(chunk_size)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect()
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn batch_parse(bencher: Bencher, n: usize) {
    let source = generate_source(n);
    bencher
        .with_inputs(|| source.clone())
        .bench_values(|source| black_box(esflow::parse_source(SourceUrl::anonymous(), &source).unwrap()));
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn batch_parse_bytes_throughput(bencher: Bencher, n: usize) {
    let source = generate_source(n);
    let bytes = source.len();
    bencher
        .counter(divan::counter::BytesCount::new(bytes))
        .with_inputs(|| source.clone())
        .bench_values(|source| black_box(esflow::parse_source(SourceUrl::anonymous(), &source).unwrap()));
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn incremental_lex_over_chunk_boundaries(bencher: Bencher, n: usize) {
    let source = generate_source(n);
    let chunks = generate_chunks(&source, 4096);

    bencher.with_inputs(|| chunks.clone()).bench_values(|chunks| {
        let mut lexer = EcmaLexer::new();
        let mut tokens = Vec::new();
        for chunk in chunks {
            tokens.extend(lexer.feed(&chunk).unwrap());
        }
        tokens.extend(lexer.finish().unwrap());
        black_box(tokens)
    });
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn incremental_full_pipeline(bencher: Bencher, n: usize) {
    let source = generate_source(n);
    let chunks = generate_chunks(&source, 4096);

    bencher
        .counter(divan::counter::BytesCount::new(source.len()))
        .with_inputs(|| chunks.clone())
        .bench_values(|chunks| {
            let mut lexer = EcmaLexer::new();
            let mut token_buffer: Vec<Token> = Vec::new();
            let mut checkpoint = ParseCheckpoint::default();
            let mut statements = Vec::new();

            for chunk in chunks {
                token_buffer.extend(lexer.feed(&chunk).unwrap());

                loop {
                    match Statement::parse_incremental(&token_buffer, &checkpoint) {
                        Ok((Some(statement), new_checkpoint)) => {
                            statements.push(statement);
                            checkpoint = new_checkpoint;
                        }
                        Ok((None, _)) | Err(_) => break,
                    }
                }
            }

            token_buffer.extend(lexer.finish().unwrap());
            loop {
                match Statement::parse_incremental(&token_buffer, &checkpoint) {
                    Ok((Some(statement), new_checkpoint)) => {
                        statements.push(statement);
                        checkpoint = new_checkpoint;
                    }
                    Ok((None, _)) | Err(_) => break,
                }
            }

            black_box(statements)
        });
}
