//! Static text shown in the overlay.
//!
//! Eight principle pages, index-aligned with the panels, plus the preamble
//! opened from the banner above the grid.

/// Title drawn on the banner.
pub const WALL_TITLE: &str = "Os oito princípios éticos do engenheiro de software";

/// CSS of the heading label a web page lays over the banner.
pub const TITLE_LABEL_STYLE: [(&str, &str); 10] = [
    ("font-family", "Arial Rounded MT Bold"),
    ("font-size", "48px"),
    ("text-align", "center"),
    ("position", "fixed"),
    ("width", "988px"),
    ("background-color", "rgba(0, 0, 0, 0)"),
    ("color", "white"),
    ("top", "17%"),
    ("left", "50%"),
    ("transform", "translate(-50%, -50%)"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextLayout {
    /// Short statement, centred in a larger font.
    Centered,
    /// Running text, justified.
    Justified,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentPayload {
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
    pub layout: TextLayout,
}

impl ContentPayload {
    pub const fn new(
        title: &'static str,
        paragraphs: &'static [&'static str],
        layout: TextLayout,
    ) -> Self {
        Self {
            title,
            paragraphs,
            layout,
        }
    }

    /// Markup for a DOM overlay: a bold centred heading followed by the body.
    pub fn to_html(&self) -> String {
        let body_style = match self.layout {
            TextLayout::Centered => "text-align: center; font-size: 24px",
            TextLayout::Justified => "text-align: justify",
        };
        let paragraphs: String = self
            .paragraphs
            .iter()
            .map(|paragraph| format!("<p>{}</p>", escape(paragraph)))
            .collect();
        format!(
            r#"<div style="text-align: center; font-weight: bold; font-size: 36px">{}</div><div style="{}">{}</div>"#,
            escape(self.title),
            body_style,
            paragraphs
        )
    }

    /// Plain text rendering: title, blank line, paragraphs.
    pub fn to_plain_text(&self) -> String {
        let mut text = String::from(self.title);
        for paragraph in self.paragraphs {
            text.push_str("\n\n");
            text.push_str(paragraph);
        }
        text
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

pub const PREAMBLE: ContentPayload = ContentPayload::new(
    "Preâmbulo",
    &[
        "Estes são os Oito Princípios sumarizados no Código de Ética e Conduta Profissional da \
         Engenharia de Software aprovado pela ACM (Association of Computing Machinery) e a IEEE-CS \
         (Institute of Eletrical and Eletronic Engineers - Computer Society).",
        "A breve versão aqui apresentada sumariza as aspirações do código num alto nível de \
         abstração. As cláusulas inclusas na versão completa dão exemplos e detalhes sobre estas \
         aspirações. Caso haja interesse, pesquise.",
        "Engenheiros de software deverão se comprometer a fazer da análise, da especificação, do \
         design, do desenvolvimento, do teste e do manuseio de software uma benéfica e respeitada \
         profissão. De acordo com seu comprometimento para com a saúde, a segurança e o bem-estar \
         do público, engenheiros de software deverão aderir aos seguintes Oito Princípios.",
    ],
    TextLayout::Justified,
);

/// One page per panel, in panel order.
pub const PRINCIPLES: [ContentPayload; 8] = [
    ContentPayload::new(
        "Princípio do Público",
        &["Engenheiros de software deverão agir consistente com o interesse público."],
        TextLayout::Centered,
    ),
    ContentPayload::new(
        "Princípio do Trabalho",
        &["Engenheiros de software deverão agir no melhor interesse dos clientes e dos \
           empregadores, consistente com o interesse público."],
        TextLayout::Centered,
    ),
    ContentPayload::new(
        "Princípio do Produto",
        &["Engenheiros de software deverão garantir que seus produtos e modificações estejam ao \
           par dos mais altos padrões de qualidade possíveis."],
        TextLayout::Centered,
    ),
    ContentPayload::new(
        "Princípio do Julgamento",
        &["Engenheiros de software deverão manter a integridade e a independência no seu \
           julgamento profissional."],
        TextLayout::Centered,
    ),
    ContentPayload::new(
        "Princípio do Gerenciamento",
        &["Líderes da engenharia de software deverão aderir e promover uma abordagem ética no \
           gerencimento do desenvolvimento e manutenção de software."],
        TextLayout::Centered,
    ),
    ContentPayload::new(
        "Princípio da Profissão",
        &["Engenheiros de software deverão promover a integridade e a reputação de sua \
           profissão, consistente com o interesse público."],
        TextLayout::Centered,
    ),
    ContentPayload::new(
        "Princípio do Coletivo",
        &["Engenheiros de software deverão ser justos e solidários para com seus colegas."],
        TextLayout::Centered,
    ),
    ContentPayload::new(
        "Princípio Próprio",
        &["Engenheiros de software deverão praticar um aprendizado vitalício acerca da prática \
           de sua profissão e deverão promover uma abordagem ética no que tange à ela."],
        TextLayout::Centered,
    ),
];
