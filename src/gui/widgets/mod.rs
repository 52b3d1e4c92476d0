use iced::{
    Background, Border, Color as IcedColor, Element, Length, Theme,
    widget::{button, column, container, row, text},
};

use crate::{
    core::{Color, FieldErrors, TextTone, form::Field},
    gui::state::{Notice, NoticeKind},
    models::Tag,
};

const CHIP_ALPHA_ACTIVE: f32 = 0.25;
const CHIP_ALPHA_IDLE: f32 = 0.15;
const FALLBACK_TAG_COLOR: Color = Color {
    r: 0x9C,
    g: 0xA3,
    b: 0xAF,
};

fn tag_color(tag: &Tag) -> Color {
    Color::from_hex_string(&tag.color_hex).unwrap_or(FALLBACK_TAG_COLOR)
}

fn to_iced(color: Color, alpha: f32) -> IcedColor {
    let rgba = color.with_alpha(alpha);
    IcedColor::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Pressable chip tinted with the tag color. Active chips get a stronger
/// fill and a solid border.
pub fn tag_chip<'a, Message: Clone + 'a>(
    tag: &'a Tag,
    active: bool,
    on_press: Option<Message>,
) -> Element<'a, Message> {
    let color = tag_color(tag);
    let label = if active {
        format!("✓ {}", tag.name)
    } else {
        tag.name.clone()
    };
    button(text(label).size(14))
        .padding([4, 10])
        .on_press_maybe(on_press)
        .style(move |_theme: &Theme, _status| {
            let fill = if active { CHIP_ALPHA_ACTIVE } else { CHIP_ALPHA_IDLE };
            button::Style {
                background: Some(Background::Color(to_iced(color, fill))),
                text_color: IcedColor::BLACK,
                border: Border {
                    color: to_iced(color, if active { 1.0 } else { 0.35 }),
                    width: 1.0,
                    radius: 12.0.into(),
                },
                ..button::Style::default()
            }
        })
        .into()
}

/// Solid badge used on cards, with text contrast picked from the fill.
pub fn tag_badge<'a, Message: 'a>(tag: &'a Tag) -> Element<'a, Message> {
    let color = tag_color(tag);
    let foreground = match color.readable_text_color() {
        TextTone::Black => IcedColor::BLACK,
        TextTone::White => IcedColor::WHITE,
    };
    container(text(tag.name.as_str()).size(12).color(foreground))
        .padding([2, 8])
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(to_iced(color, 1.0))),
            border: Border {
                color: to_iced(color, 1.0),
                width: 0.0,
                radius: 8.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

const ERROR_RED: IcedColor = IcedColor::from_rgb8(0xDC, 0x26, 0x26);

pub fn field_error<'a, Message: 'a>(
    errors: &'a FieldErrors,
    field: Field,
) -> Element<'a, Message> {
    match errors.get(field) {
        Some(message) => text(message).size(13).color(ERROR_RED).into(),
        None => column![].into(),
    }
}

/// Label, input and inline error stacked vertically.
pub fn labeled<'a, Message: 'a>(
    label: &'a str,
    input: impl Into<Element<'a, Message>>,
    errors: &'a FieldErrors,
    field: Field,
) -> Element<'a, Message> {
    column![text(label).size(14), input.into(), field_error(errors, field)]
        .spacing(4)
        .into()
}

pub fn notice_banner<'a, Message: Clone + 'a>(
    notice: &'a Notice,
    on_dismiss: Message,
) -> Element<'a, Message> {
    let tint = match notice.kind {
        NoticeKind::Success => IcedColor::from_rgb8(0x16, 0xA3, 0x4A),
        NoticeKind::Error => ERROR_RED,
    };
    container(
        row![
            text(notice.text.as_str()).color(tint).width(Length::Fill),
            button("Dismiss").on_press(on_dismiss),
        ]
        .spacing(10),
    )
    .padding(10)
    .width(Length::Fill)
    .into()
}

/// Page chrome: navigation bar, optional notice, then the screen body.
pub fn layout<'a, Message: 'a>(
    header: impl Into<Element<'a, Message>>,
    notice: Option<Element<'a, Message>>,
    main_content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let mut page = column![container(header.into()).padding(10).width(Length::Fill)];
    if let Some(notice) = notice {
        page = page.push(notice);
    }
    container(page.push(container(main_content.into()).padding(20).height(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Spinner stand-in for a section that is still fetching.
pub fn loading<'a, Message: 'a>(what: &'a str) -> Element<'a, Message> {
    container(text(format!("Loading {what}...")))
        .padding(20)
        .center_x(Length::Fill)
        .into()
}

pub fn load_error<'a, Message: Clone + 'a>(
    message: &'a str,
    retry: Message,
) -> Element<'a, Message> {
    column![
        text(message).color(ERROR_RED),
        button("Retry").on_press(retry),
    ]
    .spacing(10)
    .into()
}
