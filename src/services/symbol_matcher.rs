//! 商标符号匹配服务 - 业务能力层
//!
//! 只负责"判断"，不接触页面：输入候选列表与一个商标定义，输出分类结果。
//! 同样的输入永远得到同样的输出。

use crate::models::finding::make_snippet;
use crate::models::{Finding, Issue, TermDefinition, TextCandidate};

/// 可识别的商标符号
pub const TRADEMARK_GLYPHS: [char; 2] = ['®', '™'];

/// 商标与符号之间允许出现的分隔字符
pub const SEPARATORS: &[char] = &[
    ' ', '\t', '\r', '\n', '\u{00A0}', '.', '-', '\u{2013}', '\u{2014}', ':', ',',
];

/// 单个商标在单个页面上的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// 第一个出现位置后紧跟期望符号
    Correct { candidate: usize },
    /// 紧跟的是另一个商标符号
    WrongSymbol {
        candidate: usize,
        found: String,
        path: String,
        snippet: String,
    },
    /// 没有符号，或者是无关字符
    ///
    /// `follower` 是跳过分隔符后的那个字符（文本结束时为空），只写入 details。
    MissingSymbol {
        candidate: usize,
        follower: String,
        path: String,
        snippet: String,
    },
    /// 所有候选中都没有出现
    NotFound,
}

impl MatchOutcome {
    pub fn issue(&self) -> Issue {
        match self {
            MatchOutcome::Correct { .. } => Issue::Correct,
            MatchOutcome::WrongSymbol { .. } => Issue::WrongSymbol,
            MatchOutcome::MissingSymbol { .. } => Issue::MissingSymbol,
            MatchOutcome::NotFound => Issue::NotFound,
        }
    }

    /// 转换为输出记录，`Correct` 不输出
    pub fn into_finding(self, url: &str, term: &TermDefinition) -> Option<Finding> {
        let issue = self.issue();
        match self {
            MatchOutcome::Correct { .. } => None,
            MatchOutcome::NotFound => Some(Finding::not_found(url, &term.term, &term.symbol)),
            MatchOutcome::WrongSymbol {
                found,
                path,
                snippet,
                ..
            } => Some(Finding {
                url: url.to_string(),
                term: term.term.clone(),
                issue,
                expected: term.symbol.clone(),
                found,
                path,
                snippet,
                details: String::new(),
            }),
            // found 只记录商标符号，无关字符放进 details
            MatchOutcome::MissingSymbol {
                follower,
                path,
                snippet,
                ..
            } => Some(Finding {
                url: url.to_string(),
                term: term.term.clone(),
                issue,
                expected: term.symbol.clone(),
                found: String::new(),
                path,
                snippet,
                details: if follower.is_empty() {
                    String::new()
                } else {
                    format!("followed by {:?}", follower)
                },
            }),
        }
    }
}

/// 符号匹配器
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolMatcher;

impl SymbolMatcher {
    pub fn new() -> Self {
        Self
    }

    /// 只检查第一个出现位置：找到后不再看后面的候选，即使符号缺失
    pub fn classify(&self, candidates: &[TextCandidate], term: &TermDefinition) -> MatchOutcome {
        for (index, candidate) in candidates.iter().enumerate() {
            let text = candidate.text.as_str();
            let Some((_, end)) = find_term(text, &term.term, term.case_insensitive) else {
                continue;
            };

            let actual = symbol_after(text, end);
            let found = actual.map(String::from).unwrap_or_default();

            if found == term.symbol {
                return MatchOutcome::Correct { candidate: index };
            }

            let path = candidate.path.clone();
            let snippet = make_snippet(text);
            return match actual {
                Some(c) if TRADEMARK_GLYPHS.contains(&c) => MatchOutcome::WrongSymbol {
                    candidate: index,
                    found,
                    path,
                    snippet,
                },
                _ => MatchOutcome::MissingSymbol {
                    candidate: index,
                    follower: found,
                    path,
                    snippet,
                },
            };
        }

        MatchOutcome::NotFound
    }
}

/// 查找第一次出现的位置，返回原文中的字节区间 `[start, end)`
///
/// 不区分大小写时逐字符比较小写形式，保证区间落在原文的字符边界上。
pub fn find_term(text: &str, term: &str, case_insensitive: bool) -> Option<(usize, usize)> {
    if term.is_empty() {
        return None;
    }
    if !case_insensitive {
        return text.find(term).map(|start| (start, start + term.len()));
    }

    let term_chars: Vec<char> = term.chars().collect();
    for (start, _) in text.char_indices() {
        let mut rest = text[start..].char_indices();
        let mut end = start;
        let mut matched = true;
        for t in &term_chars {
            match rest.next() {
                Some((offset, c)) if chars_eq_ignore_case(c, *t) => {
                    end = start + offset + c.len_utf8();
                }
                _ => {
                    matched = false;
                    break;
                }
            }
        }
        if matched {
            return Some((start, end));
        }
    }
    None
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// 跳过分隔字符后取下一个字符
pub fn symbol_after(text: &str, end: usize) -> Option<char> {
    text.get(end..)?.chars().find(|c| !SEPARATORS.contains(c))
}
