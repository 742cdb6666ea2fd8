extern crate code2html;

use code2html::{code_to_html, highlight_html, CodeHighlighter, HtmlFormatter, PythonLexer, Style};

#[test]
fn assignment() {
    let html = code_to_html("x = 1\n").unwrap();
    assert!(html.starts_with("<style>"));
    assert!(html.ends_with("</div>\n"));
    assert!(html.contains(".highlight .number {"));
    assert!(html.contains(".highlight .variable {"));
    assert!(html.contains("<span class=\"variable\">x</span>"));
    assert!(html.contains("<span class=\"operator\">=</span>"));
    assert!(html.contains("<span class=\"number\">1</span>"));
}

#[test]
fn one_style_block_before_markup() {
    let html = code_to_html("def f(a):\n    return a * 2\n").unwrap();
    assert_eq!(html.matches("<style>").count(), 1);
    assert_eq!(html.matches("</style>").count(), 1);
    let style_end = html.find("</style>").unwrap();
    assert!(style_end < html.find("<div").unwrap());
    assert!(style_end < html.find("<span").unwrap());
}

#[test]
fn single_trailing_newline() {
    for src in ["", "x", "x = 1\n", "print('hi')\n\n\n"] {
        let html = code_to_html(src).unwrap();
        assert!(html.ends_with('\n'), "{src:?}");
        assert!(!html.ends_with("\n\n"), "{src:?}");
    }
}

#[test]
fn empty_source() {
    let out = highlight_html("").unwrap();
    assert!(!out.as_str().is_empty());
    assert!(!out.style_defs().is_empty());
    let markup = out.markup();
    let body = &markup[markup.find("<pre>").unwrap() + 5..markup.rfind("</pre>").unwrap()];
    assert!(body.trim().is_empty());
}

#[test]
fn style_block_ignores_input() {
    let a = highlight_html("import os\n").unwrap();
    let b = highlight_html("class A:\n    pass\n").unwrap();
    assert_eq!(a.style_defs(), b.style_defs());
    assert_ne!(a.markup(), b.markup());
}

#[test]
fn style_block_matches_formatter() {
    let out = highlight_html("y = 2\n").unwrap();
    assert_eq!(out.style_defs(), HtmlFormatter::default().style_defs());
}

#[test]
fn unterminated_string() {
    let html = code_to_html("s = \"abc\nprint(s)\n").unwrap();
    assert!(html.contains("<span class=\"error\">"));
    assert!(html.ends_with('\n'));
}

#[test]
fn garbage_does_not_fail() {
    let html = code_to_html(")))( ::: @@ $ ?\n").unwrap();
    assert!(html.contains("<span class=\"error\">"));
}

#[test]
fn special_characters_escaped() {
    let html = code_to_html("if a < b and c > d: s = '&'\n").unwrap();
    let markup = &html[html.find("</style>").unwrap()..];
    assert!(markup.contains("&lt;"));
    assert!(markup.contains("&gt;"));
    assert!(markup.contains("&amp;"));
    assert!(!markup.contains(" < "));
}

#[test]
fn keywords_and_builtins() {
    let html = code_to_html("for i in range(3):\n    print(i)  # loop\n").unwrap();
    assert!(html.contains("<span class=\"keyword\">for</span>"));
    assert!(html.contains("<span class=\"function-builtin\">range</span>"));
    assert!(html.contains("<span class=\"comment\"># loop</span>"));
}

#[test]
fn deterministic() {
    let src = "def add(a, b):\n    return a + b\n";
    assert_eq!(code_to_html(src).unwrap(), code_to_html(src).unwrap());
}

#[test]
fn concurrent_calls() {
    let handles = (0..4)
        .map(|i| std::thread::spawn(move || code_to_html(&format!("n = {i}\n")).map_err(|e| e.to_string())))
        .collect::<Vec<_>>();
    for (i, h) in handles.into_iter().enumerate() {
        let html = h.join().unwrap().unwrap();
        assert!(html.contains(&format!("<span class=\"number\">{i}</span>")));
    }
}

#[test]
fn custom_style() {
    let style = Style::from_yaml("name: plain\ntokens:\n  keyword:\n    underline: true\n").unwrap();
    let formatter = HtmlFormatter::new(style);
    assert_eq!(formatter.style_defs(), ".highlight .keyword { text-decoration: underline }\n");
    let lexer = PythonLexer::new().unwrap();
    let markup = formatter.format(&lexer, "pass\n").unwrap();
    assert_eq!(markup, "<div class=\"highlight\"><pre><span class=\"keyword\">pass</span>\n</pre></div>");
    assert_eq!(lexer.name(), "Python 3");
}

#[test]
fn unclosed_bracket_keeps_later_lines_clean() {
    let out = highlight_html("y = 3\nx = [1, 2\nz = 4\nw = 5\n").unwrap();
    let markup = out.markup();
    assert!(markup.contains("<span class=\"error\">"));
    let last = markup.lines().find(|l| l.contains(">w<")).unwrap();
    assert!(!last.contains("error"), "{last}");
}

#[test]
fn missing_paren_leaves_no_empty_span() {
    let out = highlight_html("def f(:\n  pass\n").unwrap();
    let markup = out.markup();
    assert!(markup.contains("<span class=\"error\">(</span>"));
    assert!(!markup.contains("\"></span>"));
}
