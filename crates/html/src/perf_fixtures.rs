pub const BLOCK_TEMPLATE: &str =
    "<div class=box id=b><span>hello</span><img src=x /><p data-n='1'>world</p></div>";

pub const STYLESHEET: &str = "<style>.box { display: flex; width: 300px; justify-content: space-between; } \
     span { width: 50px; height: 10px; } p { flex: 1; height: 20px; } #b img { width: 40; }</style>";

pub fn make_blocks(blocks: usize) -> String {
    let mut html = String::with_capacity(BLOCK_TEMPLATE.len() * blocks);
    for _ in 0..blocks {
        html.push_str(BLOCK_TEMPLATE);
    }
    html
}

/// `blocks` copies of the block template behind one stylesheet, so every
/// block is styled and laid out as a flex row.
pub fn make_styled_page(blocks: usize) -> String {
    let mut html = String::with_capacity(STYLESHEET.len() + BLOCK_TEMPLATE.len() * blocks + 13);
    html.push_str("<body>");
    html.push_str(STYLESHEET);
    html.push_str(&make_blocks(blocks));
    html.push_str("</body>");
    html
}
