use crate::api::ContactMessage;
use crate::designs::accent_style;
use crate::loader::Site;
use crate::render::{build_social_links, html_escape};

/// Build the contact page body. `values` refills the form after a failed submission;
/// `flash` is `(kind, message)` with kind `"success"` or `"error"`.
/// Returns `(body_html, contact_css)`.
pub fn render_body(site: &Site, values: &ContactMessage, flash: Option<(&str, &str)>) -> (String, String) {
    let form_enabled = site.config.features.contact_form;

    // Info block
    let mut info_html = String::new();
    let about = &site.view.about;
    if !about.name.is_empty() {
        info_html.push_str(&format!(
            "<p class=\"contact-name\">{}</p>",
            html_escape(&about.name)
        ));
    }
    info_html.push_str("<p class=\"contact-text\">Have a project in mind or just want to say hello? Drop me a line.</p>");

    let mut details = String::new();
    for c in &site.view.contacts {
        let value = if c.kind == "email" {
            format!("<a href=\"mailto:{0}\">{0}</a>", html_escape(&c.value))
        } else {
            html_escape(&c.value)
        };
        details.push_str(&format!(
            "<div class=\"contact-detail\"{}><strong>{}:</strong> {}</div>",
            accent_style(c.color.as_ref()),
            html_escape(&c.label),
            value
        ));
    }
    if !details.is_empty() {
        info_html.push_str(&format!("<div class=\"contact-details\">{}</div>", details));
    }

    let social = build_social_links(&site.view.socials);
    if !social.is_empty() {
        info_html.push_str(&format!("<div class=\"contact-social\">{}</div>", social));
    }

    // Form block
    let form_html = if form_enabled {
        let flash_html = match flash {
            Some(("success", msg)) => format!(
                "<div class=\"flash flash-success contact-flash\" role=\"status\">{}</div>",
                html_escape(msg)
            ),
            Some((_, msg)) => format!(
                "<div class=\"flash flash-error contact-flash\" role=\"alert\">{}</div>",
                html_escape(msg)
            ),
            None => String::new(),
        };
        format!(
            r#"{flash_html}<form method="post" action="{action}" class="contact-form">
<div class="contact-form-group"><label for="cf-name">Name</label><input type="text" id="cf-name" name="name" required placeholder="Your name" value="{name}"></div>
<div class="contact-form-group"><label for="cf-email">Email</label><input type="email" id="cf-email" name="email" required placeholder="your@email.com" value="{email}"></div>
<div class="contact-form-group"><label for="cf-message">Message</label><textarea id="cf-message" name="message" rows="6" required placeholder="Your message…">{message}</textarea></div>
<div style="display:none"><input type="text" name="_honey" tabindex="-1" autocomplete="off"></div>
<button type="submit" class="btn contact-submit">Send Message</button>
</form>"#,
            flash_html = flash_html,
            action = html_escape(&site.link("/contact")),
            name = html_escape(&values.name),
            email = html_escape(&values.email),
            message = html_escape(&values.message),
        )
    } else {
        String::new()
    };

    let title_html = "<h1 class=\"contact-title\">Contact</h1>";

    // Sidebar layouts have less room, so stack the blocks.
    let body = if site.config.layout.side_nav() {
        render_compact(title_html, &info_html, &form_html, form_enabled)
    } else {
        render_split(title_html, &info_html, &form_html, form_enabled)
    };

    (body, CSS.to_string())
}

fn render_compact(title: &str, info: &str, form: &str, form_enabled: bool) -> String {
    let separator = if form_enabled && !info.is_empty() {
        "<hr class=\"contact-divider\">"
    } else {
        ""
    };
    format!(
        "<div class=\"contact-page contact-compact\">\
        <div class=\"contact-inner\" style=\"max-width:640px\">\
        {title}{info}{sep}{form}\
        </div></div>",
        title = title,
        info = info,
        sep = separator,
        form = form,
    )
}

fn render_split(title: &str, info: &str, form: &str, form_enabled: bool) -> String {
    let left = format!(
        "<div class=\"contact-col-left\">{title}{info}</div>",
        title = title,
        info = info,
    );
    let right = if form_enabled {
        format!("<div class=\"contact-col-right\">{}</div>", form)
    } else {
        String::new()
    };
    format!(
        "<div class=\"contact-page contact-split\">\
        <div class=\"contact-columns\">{left}{right}</div></div>",
        left = left,
        right = right,
    )
}

const CSS: &str = r#"
.contact-title { font-size:2em; margin-bottom:24px; }
.contact-name { font-size:1.15em; font-weight:700; margin-bottom:8px; }
.contact-text { line-height:1.7; margin-bottom:16px; color:var(--color-text-secondary); }
.contact-details { margin-bottom:16px; }
.contact-detail { line-height:1.8; border-left:3px solid var(--accent, var(--color-primary)); padding-left:10px; margin-bottom:6px; }
.contact-detail a { color:inherit; text-decoration:underline; }
.contact-divider { border:none; border-top:1px solid var(--color-border); margin:32px 0; }
.contact-columns { display:flex; gap:40px; flex-wrap:wrap; }
.contact-col-left, .contact-col-right { flex:1; min-width:280px; }
.contact-form-group { margin-bottom:16px; }
.contact-form-group label { display:block; font-size:.9em; font-weight:600; margin-bottom:6px; }
.contact-form-group input,
.contact-form-group textarea {
    width:100%; padding:10px 12px; font-size:.95em; border:1px solid var(--color-border);
    background:var(--color-surface); color:inherit; border-radius:6px; font-family:inherit;
}
.contact-form-group textarea { resize:vertical; }
.contact-social { margin-top:16px; }
@media (max-width:640px) {
    .contact-columns { flex-direction:column; }
}
"#;
