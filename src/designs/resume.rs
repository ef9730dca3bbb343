use crate::content::ResumeEntry;
use crate::designs::accent_style;
use crate::loader::Site;
use crate::pdf::Template;
use crate::render::html_escape;

/// Resume page: experience and education timelines, skill bars, knowledge tags.
pub fn render_body(site: &Site) -> (String, String) {
    let view = &site.view;
    let mut html = String::from("<section class=\"resume\"><h1>Resume</h1>");

    if site.config.features.pdf_download {
        html.push_str("<div class=\"cv-links\">");
        for template in Template::ALL {
            html.push_str(&format!(
                "<a class=\"btn btn-small\" href=\"{}\">Download CV ({})</a>",
                html_escape(&site.link(&format!("/resume.pdf?template={}", template.as_str()))),
                template.label()
            ));
        }
        html.push_str("</div>");
    }

    html.push_str("<div class=\"resume-columns\">");
    if !view.experiences.is_empty() {
        html.push_str(&timeline("Experience", &view.experiences));
    }
    if !view.educations.is_empty() {
        html.push_str(&timeline("Education", &view.educations));
    }
    html.push_str("</div>");

    if !view.skills.is_empty() {
        html.push_str("<h2 class=\"section-title\">Skills</h2><div class=\"skills\">");
        for s in &view.skills {
            html.push_str(&format!(
                "<div class=\"skill\"{style}><div class=\"skill-head\"><span>{name}</span><span class=\"meta\">{level}%</span></div>\
                 <div class=\"skill-track\"><div class=\"skill-fill\" style=\"width:{level}%\"></div></div></div>",
                style = accent_style(s.color.as_ref()),
                name = html_escape(&s.name),
                level = s.level.min(100),
            ));
        }
        html.push_str("</div>");
    }

    if !view.knowledges.is_empty() {
        html.push_str("<h2 class=\"section-title\">Knowledge</h2><div class=\"knowledge\">");
        for k in &view.knowledges {
            html.push_str(&format!("<span class=\"tag\">{}</span>", html_escape(k)));
        }
        html.push_str("</div>");
    }

    html.push_str("</section>");
    (html, CSS.to_string())
}

fn timeline(title: &str, entries: &[ResumeEntry]) -> String {
    let mut html = format!(
        "<div class=\"timeline-block\"><h2 class=\"section-title\">{}</h2><ol class=\"timeline\">",
        html_escape(title)
    );
    for e in entries {
        html.push_str(&format!(
            "<li class=\"card accent-bar\"{}><span class=\"meta\">{}</span><h3>{}</h3><p class=\"org\">{}</p>",
            accent_style(e.color.as_ref()),
            html_escape(&e.period),
            html_escape(&e.title),
            html_escape(&e.organization)
        ));
        if !e.description.trim().is_empty() {
            html.push_str(&format!("<p>{}</p>", html_escape(&e.description)));
        }
        html.push_str("</li>");
    }
    html.push_str("</ol></div>");
    html
}

const CSS: &str = r#"
.cv-links { display: flex; gap: 10px; margin: 8px 0 20px; flex-wrap: wrap; }
.resume-columns { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 24px; }
.timeline { list-style: none; display: flex; flex-direction: column; gap: 14px; }
.org { color: var(--color-text-secondary); }
.skills { display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 14px 24px; }
.skill-head { display: flex; justify-content: space-between; }
.skill-track { height: 6px; border-radius: 3px; background: var(--color-border); overflow: hidden; }
.skill-fill { height: 100%; background: var(--accent, var(--color-primary)); }
"#;
