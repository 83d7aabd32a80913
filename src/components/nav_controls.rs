use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NavControlsProps {
    pub label: String,
    pub on_prev: Callback<()>,
    pub on_next: Callback<()>,
}

#[function_component(NavControls)]
pub fn nav_controls(props: &NavControlsProps) -> Html {
    let prev = {
        let cb = props.on_prev.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let next = {
        let cb = props.on_next.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {
        <div style="display:flex; align-items:center; justify-content:center; gap:12px; padding:10px 16px;">
            <button onclick={prev}>{"←"}</button>
            <span style="min-width:72px; text-align:center; font-variant-numeric:tabular-nums;">{ props.label.clone() }</span>
            <button onclick={next}>{"→"}</button>
            <span style="font-size:12px; opacity:0.6;">{"arrow keys work too"}</span>
        </div>
    }
}
