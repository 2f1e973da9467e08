#![allow(dead_code)]

use pl0c::{Error, RecognizerOptions, ScopeCollection, Token, Traced};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Classify whitespace-separated words, the test sources are written with a space around every
/// token
pub fn words(source: &str) -> Vec<Token<'_>> {
    source
        .split_whitespace()
        .map(|word| Token::from_word(word).unwrap_or_else(|| panic!("not a token: {word:?}")))
        .collect()
}

/// Same as `words` but every token remembers its byte range in `source`
pub fn traced<'a>(file_name: &'a str, source: &'a str) -> Vec<Traced<'a, Token<'a>>> {
    source
        .split_whitespace()
        .map(|word| {
            let start = word.as_ptr() as usize - source.as_ptr() as usize;
            let token = Token::from_word(word).unwrap_or_else(|| panic!("not a token: {word:?}"));
            token.wrap_loc((file_name, start, start + word.len()))
        })
        .collect()
}

pub fn parse(source: &str) -> Result<ScopeCollection<'_>, Error<'_>> {
    init_logger();
    pl0c::recognize(words(source))
}

pub fn parse_with(
    source: &str,
    options: RecognizerOptions,
) -> Result<ScopeCollection<'_>, Error<'_>> {
    init_logger();
    pl0c::recognize_with(words(source), options)
}

/// The nested procedures sample: `main` holds `A`, `A` holds `B` and `D`, `B` holds `C`
pub const NESTED: &str = "
program main ;
var int x ;
var float res_D ;
arr int y [ 15 ] ;
arr float z [ 12 , 5 ] ;
procedure int A ( var int param ) ;
    procedure int B ( var int param ) ;
        var float num ;
        procedure int C ( var int param , arr int a ) ;
        var int x ;
        begin
            x := param - 1 ;
            return x ;
        end
    begin
        x := param - 1 ;
        return x ;
    end
    procedure float D ( var int param ) ;
    var int res_B ;
    begin
        x := param - 1 ;
        res_B := call B ( x ) ;
        return res_B ;
    end
begin
    x := param - 1 ;
    res_D := call D ( x ) ;
    return res_D ;
end

begin
    x := 5 ;
    res_A := call A ( x ) ;
    write ( x ) ;
end
";
